//! Orders accepted by the action reader.
//!
//! Each order word maps to one [`Order`] kind through [`ACTION_ORDERS`];
//! the same table renders the help text, so adding an order means adding a
//! row and a handler.

/// One row of an order table
#[derive(Debug, Clone, Copy)]
pub struct OrderSpec<O> {
    pub word: &'static str,
    pub order: O,
    pub usage: &'static str,
    pub summary: &'static str,
}

/// Orders of the action reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Command,
    Counters,
    Exit,
    FoundSomething,
    FoundNothing,
    Help,
    Investigators,
    Json,
    Meta,
    Refresh,
    Times,
}

pub const ACTION_ORDERS: &[OrderSpec<Order>] = &[
    OrderSpec {
        word: "command",
        order: Order::Command,
        usage: "command <id>",
        summary: "jump to command reader mode for command <id>",
    },
    OrderSpec {
        word: "counters",
        order: Order::Counters,
        usage: "counters",
        summary: "display the counters of the action",
    },
    OrderSpec {
        word: "exit",
        order: Order::Exit,
        usage: "exit",
        summary: "exit this mode",
    },
    OrderSpec {
        word: "foundsomething",
        order: Order::FoundSomething,
        usage: "foundsomething",
        summary: "list commands and agents that have found something",
    },
    OrderSpec {
        word: "foundnothing",
        order: Order::FoundNothing,
        usage: "foundnothing",
        summary: "list commands and agents that have found nothing",
    },
    OrderSpec {
        word: "help",
        order: Order::Help,
        usage: "help",
        summary: "show this help",
    },
    OrderSpec {
        word: "investigators",
        order: Order::Investigators,
        usage: "investigators",
        summary: "print the list of investigators that signed the action",
    },
    OrderSpec {
        word: "json",
        order: Order::Json,
        usage: "json <pretty>",
        summary: "show the json of the action",
    },
    OrderSpec {
        word: "meta",
        order: Order::Meta,
        usage: "meta",
        summary: "display the action metadata",
    },
    OrderSpec {
        word: "r",
        order: Order::Refresh,
        usage: "r",
        summary: "refresh the action (get latest version from upstream)",
    },
    OrderSpec {
        word: "times",
        order: Order::Times,
        usage: "times",
        summary: "show the various timestamps of the action",
    },
];

/// Find the order kind for `word` in `table`.
pub fn lookup<O: Copy>(table: &[OrderSpec<O>], word: &str) -> Option<O> {
    table.iter().find(|spec| spec.word == word).map(|spec| spec.order)
}

/// Help text listing every order of `table`.
pub fn help_text<O>(table: &[OrderSpec<O>]) -> String {
    let width = table.iter().map(|spec| spec.usage.len()).max().unwrap_or(0) + 2;
    let mut out = String::from("The following orders are available:\n");
    for spec in table {
        out.push_str(&format!("{:<width$}{}\n", spec.usage, spec.summary));
    }
    out
}

/// A line split into its order word and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a, O> {
    Empty,
    Known { order: O, args: Vec<&'a str> },
    Unknown(&'a str),
}

pub fn parse_line<'a, O: Copy>(table: &[OrderSpec<O>], line: &'a str) -> ParsedLine<'a, O> {
    let mut tokens = line.split_whitespace();
    let Some(word) = tokens.next() else {
        return ParsedLine::Empty;
    };
    match lookup(table, word) {
        Some(order) => ParsedLine::Known {
            order,
            args: tokens.collect(),
        },
        None => ParsedLine::Unknown(word),
    }
}
