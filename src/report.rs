use crate::allowlist::Allowlist;
use crate::ledger::{CharacterLedger, DamageLedgerSet, DamageTotal, TypeBreakdown};
use crate::stats::{Performance, PopulationStats, share, target_share};
use serde::Serialize;
use std::fmt::{self, Write};

/// Inflicted damage split between the allowlisted party and everyone else.
#[derive(Debug, Clone, PartialEq)]
pub struct PartySplit {
    pub party_total: DamageTotal,
    pub party_share: f64,
    pub rest_total: DamageTotal,
    pub rest_share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub name: String,
    pub total_inflicted: DamageTotal,
    pub share: f64,
    pub offset: f64,
    pub inflicted: Vec<(String, DamageTotal)>,
    pub received: Vec<(String, DamageTotal)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceLine {
    pub name: String,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageReport {
    pub target_share: f64,
    pub total_inflicted_all: DamageTotal,
    pub party: Option<PartySplit>,
    /// Highest inflicted damage first.
    pub characters: Vec<CharacterSummary>,
    /// Ledger order.
    pub performance: Vec<PerformanceLine>,
}

impl DamageReport {
    /// With `filtering` set the party lines are printed even when no
    /// allowlisted name is known; the party is then everyone.
    pub fn build(
        ledgers: &DamageLedgerSet,
        allowlist: Option<&Allowlist>,
        filtering: bool,
    ) -> Self {
        let allowlist = allowlist.filter(|list| !list.is_empty());
        let scope = in_scope(ledgers, allowlist);

        let total_inflicted_all = ledgers.total_inflicted();
        let scope_total: DamageTotal = scope.iter().map(|l| l.total_inflicted()).sum();
        let target = target_share(allowlist.map_or(ledgers.len(), Allowlist::len));

        let party = (filtering || allowlist.is_some()).then(|| {
            let rest_total = total_inflicted_all - scope_total;
            PartySplit {
                party_total: scope_total,
                party_share: share(scope_total, total_inflicted_all),
                rest_total,
                rest_share: share(rest_total, total_inflicted_all),
            }
        });

        let mut ranked = scope.clone();
        ranked.sort_by(|a, b| b.total_inflicted().cmp(&a.total_inflicted()));
        let characters = ranked
            .into_iter()
            .map(|ledger| {
                let pct = share(ledger.total_inflicted(), scope_total);
                CharacterSummary {
                    name: ledger.name().to_string(),
                    total_inflicted: ledger.total_inflicted(),
                    share: pct,
                    offset: pct - target,
                    inflicted: owned_ranking(ledger.inflicted_by_type()),
                    received: owned_ranking(ledger.received_by_type()),
                }
            })
            .collect();

        let performance = match PopulationStats::compute(scope.iter().copied()) {
            Some(stats) => scope
                .iter()
                .map(|ledger| PerformanceLine {
                    name: ledger.name().to_string(),
                    performance: stats.performance(ledger),
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            target_share: target,
            total_inflicted_all,
            party,
            characters,
            performance,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "### Damage Statistics: Target: {:.2}%\n\n", self.target_share)?;
        write!(out, "**Total Damage Inflicted by All:** {}\n\n", self.total_inflicted_all)?;

        if let Some(party) = &self.party {
            write!(
                out,
                "**Total Damage Inflicted by Allowlist (Party):** {} ({:.2}%)\n\n",
                party.party_total, party.party_share
            )?;
            write!(
                out,
                "**Total Damage Inflicted by Non-Party:** {} ({:.2}%)\n\n\n",
                party.rest_total, party.rest_share
            )?;
        }

        for c in &self.characters {
            writeln!(
                out,
                "**{}** - Total Inflicted: {} ({:.2}%, Offset: {:+.2}%)",
                c.name, c.total_inflicted, c.share, c.offset
            )?;
            writeln!(out, "- **Damage Inflicted:** {}", join_types(&c.inflicted))?;
            write!(out, "- **Damage Received:** {}\n\n", join_types(&c.received))?;
        }

        if !self.performance.is_empty() {
            writeln!(out, "\n### Performance Categories")?;
            for line in &self.performance {
                let p = &line.performance;
                writeln!(
                    out,
                    "- **{} ({})** - Damage Dealt: {}, Damage Taken: {}",
                    line.name, p.tier, p.dealt, p.taken
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DamageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_markdown(f)
    }
}

fn in_scope<'a>(
    ledgers: &'a DamageLedgerSet,
    allowlist: Option<&Allowlist>,
) -> Vec<&'a CharacterLedger> {
    ledgers
        .iter()
        .filter(|ledger| allowlist.is_none_or(|list| list.contains(ledger.name())))
        .collect()
}

fn owned_ranking(breakdown: &TypeBreakdown) -> Vec<(String, DamageTotal)> {
    breakdown
        .ranked()
        .into_iter()
        .map(|(damage_type, amount)| (damage_type.to_string(), amount))
        .collect()
}

fn join_types(types: &[(String, DamageTotal)]) -> String {
    types
        .iter()
        .map(|(damage_type, amount)| format!("{damage_type}: {amount}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Inflicted,
    Received,
}

impl Series {
    pub fn title(&self) -> &'static str {
        match self {
            Series::Inflicted => "Damage Inflicted by Type",
            Series::Received => "Damage Received by Type",
        }
    }
}

/// One bar segment: a character's damage of one type. Exactly one of
/// `inflicted` and `received` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub character: String,
    pub damage_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflicted: Option<DamageTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<DamageTotal>,
}

impl ChartRow {
    pub fn amount(&self, series: Series) -> Option<DamageTotal> {
        match series {
            Series::Inflicted => self.inflicted,
            Series::Received => self.received,
        }
    }
}

pub fn chart_rows(ledgers: &DamageLedgerSet, allowlist: Option<&Allowlist>) -> Vec<ChartRow> {
    let allowlist = allowlist.filter(|list| !list.is_empty());
    let mut rows = Vec::new();
    for ledger in in_scope(ledgers, allowlist) {
        for (damage_type, amount) in ledger.inflicted_by_type().iter() {
            rows.push(ChartRow {
                character: ledger.name().to_string(),
                damage_type: damage_type.to_string(),
                inflicted: Some(amount),
                received: None,
            });
        }
        for (damage_type, amount) in ledger.received_by_type().iter() {
            rows.push(ChartRow {
                character: ledger.name().to_string(),
                damage_type: damage_type.to_string(),
                inflicted: None,
                received: Some(amount),
            });
        }
    }
    rows
}
