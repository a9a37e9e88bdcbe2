//! One report run over a batch of log files.

use crate::allowlist::Allowlist;
use crate::ledger::DamageLedgerSet;
use crate::parser::parse_events;
use crate::report::{ChartRow, DamageReport, chart_rows};
use hashbrown::HashSet;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A log file as handed over by whoever collected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInput {
    pub name: String,
    pub text: String,
}

impl LogInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Comma separated party names.
    pub names: Option<String>,
    pub use_allowlist: bool,
}

/// Problems worth showing to the user. None of them stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    DuplicateFiles(Vec<String>),
    UnknownNames(Vec<String>),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateFiles(_) => write!(f, "Warning: Duplicate log files detected."),
            Warning::UnknownNames(names) => write!(
                f,
                "Warning: The following names do not exist in the data: {}",
                names.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub ledgers: DamageLedgerSet,
    /// The allowlist actually applied, after unknown names were dropped.
    pub allowlist: Option<Allowlist>,
    pub report: DamageReport,
    pub rows: Vec<ChartRow>,
    pub warnings: Vec<Warning>,
}

impl Analysis {
    pub fn report_text(&self) -> String {
        self.report.render()
    }
}

pub fn analyze(inputs: &[LogInput], options: &AnalysisOptions) -> Analysis {
    let mut warnings = Vec::new();

    let duplicates = duplicate_names(inputs);
    if !duplicates.is_empty() {
        tracing::warn!(files = ?duplicates, "duplicate log files in batch");
        warnings.push(Warning::DuplicateFiles(duplicates));
    }

    let ledgers = DamageLedgerSet::from_events(parse_events(inputs.iter().map(|i| i.text.as_str())));
    tracing::debug!(
        files = inputs.len(),
        characters = ledgers.len(),
        "aggregated damage events"
    );

    let mut allowlist = if options.use_allowlist {
        options.names.as_deref().and_then(Allowlist::parse)
    } else {
        None
    };
    if let Some(list) = allowlist.as_mut() {
        let missing = list.retain_known(&ledgers);
        if !missing.is_empty() {
            tracing::warn!(names = ?missing, "allowlist names missing from the logs");
            warnings.push(Warning::UnknownNames(missing));
        }
    }
    let allowlist = allowlist.filter(|list| !list.is_empty());

    let report = DamageReport::build(&ledgers, allowlist.as_ref(), options.use_allowlist);
    let rows = chart_rows(&ledgers, allowlist.as_ref());

    let message = diagnostic_message(&ledgers, allowlist.as_ref(), &current_timestamp());
    tracing::info!("{message}");

    Analysis {
        ledgers,
        allowlist,
        report,
        rows,
        warnings,
    }
}

/// Names that occur more than once, each reported once.
pub fn duplicate_names(inputs: &[LogInput]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for input in inputs {
        if !seen.insert(input.name.as_str()) && !duplicates.contains(&input.name) {
            duplicates.push(input.name.clone());
        }
    }
    duplicates
}

pub fn diagnostic_message(
    ledgers: &DamageLedgerSet,
    allowlist: Option<&Allowlist>,
    timestamp: &str,
) -> String {
    let mut message = format!("Debug: Damage report generated at {timestamp}\n");
    match allowlist.filter(|list| !list.is_empty()) {
        Some(list) => {
            let mut total = 0;
            let players: Vec<String> = list
                .names()
                .iter()
                .map(|name| {
                    let inflicted = ledgers.get(name).map_or(0, |l| l.total_inflicted());
                    total += inflicted;
                    format!("{name}: {inflicted}")
                })
                .collect();
            message.push_str(&format!(
                "Players in session: {} | Total: {total}",
                players.join(", ")
            ));
        }
        None => message.push_str(&format!("Total damage: {}", ledgers.total_inflicted())),
    }
    message
}

fn current_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(TIMESTAMP_FORMAT).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "timestamp formatting failed");
        now.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Defender: Gale, Attacker: Shadowheart, Type: Fire, Damage: 10, Cause: Spell\n\
        Defender: Shadowheart, Attacker: Gale, Type: , Damage: 5, Cause: Melee\n";

    fn options(names: Option<&str>, use_allowlist: bool) -> AnalysisOptions {
        AnalysisOptions {
            names: names.map(str::to_string),
            use_allowlist,
        }
    }

    #[test]
    fn test_empty_batch() {
        let analysis = analyze(&[], &options(None, true));

        assert!(analysis.warnings.is_empty());
        assert!(analysis.ledgers.is_empty());
        assert!(analysis.rows.is_empty());
        let text = analysis.report_text();
        assert!(text.contains("**Total Damage Inflicted by All:** 0"));
        assert!(!text.contains("Performance Categories"));
    }

    #[test]
    fn test_duplicate_files_still_aggregated() {
        let inputs = vec![
            LogInput::new("combat.log", EXAMPLE),
            LogInput::new("other.log", ""),
            LogInput::new("combat.log", EXAMPLE),
        ];
        let analysis = analyze(&inputs, &options(None, false));

        assert_eq!(
            analysis.warnings,
            vec![Warning::DuplicateFiles(vec!["combat.log".to_string()])]
        );
        assert_eq!(analysis.warnings[0].to_string(), "Warning: Duplicate log files detected.");
        assert_eq!(analysis.ledgers.total_inflicted(), 30);
        assert!(analysis.report_text().contains("**Total Damage Inflicted by All:** 30"));
    }

    #[test]
    fn test_unknown_names_removed() {
        let inputs = vec![LogInput::new("combat.log", EXAMPLE)];
        let analysis = analyze(&inputs, &options(Some("Gale, Minthara"), true));

        assert_eq!(
            analysis.warnings,
            vec![Warning::UnknownNames(vec!["Minthara".to_string()])]
        );
        assert_eq!(
            analysis.warnings[0].to_string(),
            "Warning: The following names do not exist in the data: Minthara"
        );
        assert_eq!(analysis.allowlist.as_ref().unwrap().names(), ["Gale"]);

        let text = analysis.report_text();
        assert!(text.contains("### Damage Statistics: Target: 100.00%"));
        assert!(text.contains("**Total Damage Inflicted by Allowlist (Party):** 5 (33.33%)"));
        assert!(text.contains("**Gale** - Total Inflicted: 5 (100.00%, Offset: +0.00%)"));
        assert!(!text.contains("**Shadowheart**"));
    }

    #[test]
    fn test_all_names_unknown_falls_back_to_everyone() {
        let inputs = vec![LogInput::new("combat.log", EXAMPLE)];
        let analysis = analyze(&inputs, &options(Some("Minsc"), true));

        assert!(analysis.allowlist.is_none());
        assert_eq!(analysis.report.characters.len(), 2);
        assert_eq!(analysis.rows.len(), 4);

        let text = analysis.report_text();
        assert!(text.contains("### Damage Statistics: Target: 50.00%"));
        assert!(text.contains("**Total Damage Inflicted by Allowlist (Party):** 15 (100.00%)"));
        assert!(text.contains("**Total Damage Inflicted by Non-Party:** 0 (0.00%)"));
    }

    #[test]
    fn test_filtering_without_names_keeps_party_lines() {
        let inputs = vec![LogInput::new("combat.log", EXAMPLE)];
        let analysis = analyze(&inputs, &options(None, true));

        assert!(analysis.warnings.is_empty());
        assert!(analysis.allowlist.is_none());
        let party = analysis.report.party.as_ref().unwrap();
        assert_eq!(party.party_total, 15);
        assert_eq!(party.rest_total, 0);
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let max = u64::MAX;
        let half = 10_000_000_000_000_000_000u64;
        let text = format!(
            "Defender: Gale, Attacker: Gale, Type: Fire, Damage: {max}, Cause: Spell\n\
             Defender: Wyll, Attacker: Karlach, Type: Fire, Damage: {half}, Cause: Weapon\n\
             Defender: Wyll, Attacker: Karlach, Type: Fire, Damage: {half}, Cause: Weapon\n"
        );
        let analysis = analyze(&[LogInput::new("combat.log", text)], &options(None, false));

        let gale = analysis.ledgers.get("Gale").unwrap();
        assert_eq!(gale.total_damage(), 2 * u128::from(max));
        let karlach = analysis.ledgers.get("Karlach").unwrap();
        assert_eq!(karlach.total_inflicted(), 20_000_000_000_000_000_000);
        assert!(
            analysis
                .report_text()
                .contains("**Karlach** - Total Inflicted: 20000000000000000000")
        );
    }

    #[test]
    fn test_allowlist_ignored_when_disabled() {
        let inputs = vec![LogInput::new("combat.log", EXAMPLE)];
        let analysis = analyze(&inputs, &options(Some("Minthara"), false));

        assert!(analysis.warnings.is_empty());
        assert!(analysis.allowlist.is_none());
        assert_eq!(analysis.report.characters.len(), 2);
    }

    #[test]
    fn test_diagnostic_message() {
        let inputs = vec![LogInput::new("combat.log", EXAMPLE)];
        let analysis = analyze(&inputs, &options(None, false));

        let everyone = diagnostic_message(&analysis.ledgers, None, "2024-01-02 03:04:05");
        assert_eq!(
            everyone,
            "Debug: Damage report generated at 2024-01-02 03:04:05\nTotal damage: 15"
        );

        let party = Allowlist::parse("Gale, Shadowheart").unwrap();
        let message = diagnostic_message(&analysis.ledgers, Some(&party), "2024-01-02 03:04:05");
        assert_eq!(
            message,
            "Debug: Damage report generated at 2024-01-02 03:04:05\n\
             Players in session: Gale: 5, Shadowheart: 10 | Total: 15"
        );
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let inputs = vec![
            LogInput::new("a", ""),
            LogInput::new("a", ""),
            LogInput::new("a", ""),
            LogInput::new("b", ""),
        ];
        assert_eq!(duplicate_names(&inputs), vec!["a".to_string()]);
    }
}
