pub mod allowlist;
pub mod analysis;
pub mod app_state;
pub mod chart;
pub mod commands;
pub mod error;
pub mod event_models;
pub mod ledger;
pub mod logging;
pub mod parser;
pub mod reader;
pub mod repl;
pub mod report;
pub mod stats;

pub use allowlist::Allowlist;
pub use analysis::{Analysis, AnalysisOptions, LogInput, Warning, analyze};
pub use event_models::*;
pub use ledger::{CharacterLedger, DamageLedgerSet, DamageTotal};
pub use parser::{parse_events, parse_line};
pub use report::{ChartRow, DamageReport};
