//! Text renderings of an action record.
//!
//! Everything here is a pure function of the record so the output of each
//! order can be checked without driving a session.

use chrono::{DateTime, Utc};
use mig_client::{ActionRecord, Counters, Investigator};

/// Longest investigator summary shown in the banner
pub const INVESTIGATORS_MAX: usize = 30;
const ELLIPSIS: &str = "...";

/// Investigator names joined with `"; "`, cut to [`INVESTIGATORS_MAX`] characters.
pub fn investigators_summary(investigators: &[Investigator]) -> String {
    let joined = investigators
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    if joined.chars().count() <= INVESTIGATORS_MAX {
        return joined;
    }
    let mut cut: String = joined
        .chars()
        .take(INVESTIGATORS_MAX - ELLIPSIS.len())
        .collect();
    cut.push_str(ELLIPSIS);
    cut
}

pub fn banner(action: &ActionRecord) -> String {
    format!(
        "Entering action reader mode. Type exit or press ctrl+d to leave. help may help.\n\
         Action: '{}'.\nLaunched by '{}' on '{}'.\nStatus '{}'.\n",
        action.name,
        investigators_summary(&action.investigators),
        timestamp(&action.start_time),
        action.status
    )
}

pub fn counters(counters: &Counters) -> String {
    format!(
        "Sent:\t\t{}\nReturned:\t{}\nDone:\t\t{}\nCancelled:\t{}\nFailed:\t\t{}\nTimeout:\t{}\n",
        counters.sent,
        counters.returned,
        counters.done,
        counters.cancelled,
        counters.failed,
        counters.timeout
    )
}

pub fn investigators(action: &ActionRecord) -> String {
    action
        .investigators
        .iter()
        .map(|i| format!("{} - Key ID: {}\n", i.name, i.pgp_fingerprint))
        .collect()
}

pub fn meta(action: &ActionRecord) -> String {
    let d = &action.description;
    let t = &action.threat;
    let modules = action
        .operations
        .iter()
        .map(|op| op.module.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Action id {} named '{}'\nTarget '{}'\n\
         Description: Author '{} <{}>'; Revision '{}'; URL '{}'\n\
         Threat: Type '{}', Level '{}', Family '{}', Reference '{}'\n\
         Operations: {} -> {}\n",
        action.id,
        action.name,
        action.target,
        d.author,
        d.email,
        d.revision,
        d.url,
        t.kind,
        t.level,
        t.family,
        t.reference,
        action.operations.len(),
        modules
    )
}

pub fn times(action: &ActionRecord) -> String {
    format!(
        "Valid from   '{}' until '{}'\nStarted on   '{}'\nLast updated '{}'\nFinished on  '{}'\n",
        timestamp(&action.valid_from),
        timestamp(&action.expire_after),
        timestamp(&action.start_time),
        timestamp(&action.last_update_time),
        timestamp(&action.finish_time)
    )
}

fn timestamp(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Compact,
    Pretty,
}

impl JsonStyle {
    /// Style selected by the optional argument of `json`; an unknown
    /// argument is handed back as the error.
    pub fn from_option(option: Option<&str>) -> Result<Self, &str> {
        match option {
            None => Ok(JsonStyle::Compact),
            Some("pretty") => Ok(JsonStyle::Pretty),
            Some(other) => Err(other),
        }
    }
}

pub fn json(action: &ActionRecord, style: JsonStyle) -> serde_json::Result<String> {
    match style {
        JsonStyle::Compact => serde_json::to_string(action),
        JsonStyle::Pretty => serde_json::to_string_pretty(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mig_client::{Description, Operation, Threat};

    fn investigator(name: &str) -> Investigator {
        Investigator {
            name: name.to_string(),
            pgp_fingerprint: format!("{name}-FPR"),
        }
    }

    fn sample_action() -> ActionRecord {
        ActionRecord {
            id: 42,
            name: "survey".to_string(),
            target: "os='linux'".to_string(),
            description: Description {
                author: "Jane Doe".to_string(),
                email: "jane@example.net".to_string(),
                url: "https://wiki.example.net/survey".to_string(),
                revision: 2,
            },
            threat: Threat {
                reference: "IOC-1234".to_string(),
                level: "high".to_string(),
                family: "botnet".to_string(),
                kind: "malware".to_string(),
            },
            operations: vec![
                Operation {
                    module: "filechecker".to_string(),
                    parameters: serde_json::json!({}),
                },
                Operation {
                    module: "netstat".to_string(),
                    parameters: serde_json::Value::Null,
                },
            ],
            investigators: vec![investigator("Jane Doe")],
            status: "completed".to_string(),
            counters: Counters {
                sent: 10,
                returned: 8,
                done: 8,
                cancelled: 0,
                failed: 2,
                timeout: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_short_investigator_list_is_untouched() {
        let list = [investigator("Jane Doe"), investigator("John Roe")];
        assert_eq!(investigators_summary(&list), "Jane Doe; John Roe");
    }

    #[test]
    fn test_exactly_thirty_chars_is_untouched() {
        let name = "x".repeat(INVESTIGATORS_MAX);
        let summary = investigators_summary(&[investigator(&name)]);
        assert_eq!(summary, name);
        assert!(!summary.ends_with("..."));
    }

    #[test]
    fn test_long_investigator_list_is_cut_to_thirty() {
        let list = [
            investigator("Julien Vehent"),
            investigator("Guillaume Destuynder"),
            investigator("Jane Doe"),
        ];
        let summary = investigators_summary(&list);
        assert_eq!(summary.chars().count(), 30);
        assert!(summary.ends_with("..."));
        assert_eq!(summary, "Julien Vehent; Guillaume De...");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let summary = investigators_summary(&[investigator(&"é".repeat(40))]);
        assert_eq!(summary.chars().count(), 30);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_counters_fixed_order() {
        assert_eq!(
            counters(&sample_action().counters),
            "Sent:\t\t10\nReturned:\t8\nDone:\t\t8\nCancelled:\t0\nFailed:\t\t2\nTimeout:\t0\n"
        );
    }

    #[test]
    fn test_meta_lists_operations() {
        let text = meta(&sample_action());
        assert!(text.starts_with("Action id 42 named 'survey'\n"));
        assert!(text.contains("Author 'Jane Doe <jane@example.net>'; Revision '2'"));
        assert!(text.contains("Threat: Type 'malware', Level 'high', Family 'botnet', Reference 'IOC-1234'"));
        assert!(text.ends_with("Operations: 2 -> filechecker; netstat\n"));
    }

    #[test]
    fn test_times_fixed_order() {
        let mut action = sample_action();
        action.valid_from = "2014-03-01T12:00:00Z".parse().unwrap();
        action.finish_time = "2014-03-01T12:10:00Z".parse().unwrap();
        let text = times(&action);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Valid from   '2014-03-01 12:00:00 UTC' until "));
        assert_eq!(lines[3], "Finished on  '2014-03-01 12:10:00 UTC'");
    }

    #[test]
    fn test_investigators_one_per_line() {
        let mut action = sample_action();
        action.investigators.push(investigator("John Roe"));
        assert_eq!(
            investigators(&action),
            "Jane Doe - Key ID: Jane Doe-FPR\nJohn Roe - Key ID: John Roe-FPR\n"
        );
    }

    #[test]
    fn test_json_style_from_option() {
        assert_eq!(JsonStyle::from_option(None), Ok(JsonStyle::Compact));
        assert_eq!(JsonStyle::from_option(Some("pretty")), Ok(JsonStyle::Pretty));
        assert_eq!(JsonStyle::from_option(Some("badoption")), Err("badoption"));
    }

    #[test]
    fn test_pretty_json_indents_two_spaces() {
        let text = json(&sample_action(), JsonStyle::Pretty).unwrap();
        assert!(text.lines().any(|l| l == "  \"Name\": \"survey\","));
        let back: ActionRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample_action());
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let text = json(&sample_action(), JsonStyle::Compact).unwrap();
        assert_eq!(text.lines().count(), 1);
        let back: ActionRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample_action());
    }

    #[test]
    fn test_banner_mentions_status() {
        let text = banner(&sample_action());
        assert!(text.contains("Action: 'survey'."));
        assert!(text.contains("Launched by 'Jane Doe' on '1970-01-01 00:00:00 UTC'."));
        assert!(text.ends_with("Status 'completed'.\n"));
    }
}
