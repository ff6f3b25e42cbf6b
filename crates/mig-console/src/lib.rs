//! MIG Console: interactive readers for MIG actions and commands
//!
//! ## Commands
//!
//! - `action <id>`: load an action and inspect it (counters, metadata,
//!   timestamps, investigators, JSON, found/not-found agents)
//! - `command <id>`: show one command of an action
//!
//! Remote access goes through [`mig_client::MigClient`]; terminal input
//! through a [`line::LineSource`].

pub mod action;
pub mod aggregate;
pub mod command;
pub mod console;
pub mod error;
pub mod line;
pub mod order;
pub mod render;
pub mod telemetry;

pub use action::{ActionSession, Flow};
pub use command::{CommandInspector, CommandReader};
pub use console::run_shell;
pub use error::{ConsoleError, Operation, Result};
pub use line::{open_lines, EditorLines, LineError, LineSource, ScriptedLines};
pub use order::{Order, ACTION_ORDERS};
pub use telemetry::{init_tracing, level_from_verbosity};

/// Console version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
