//! Descriptive statistics over a population of character ledgers.
//!
//! Quartiles use linear interpolation between closest ranks, so the 25th
//! percentile of `[1, 2, 3, 4]` is `1.75`. Values outside
//! `[q1 - 1.5 IQR, q3 + 1.5 IQR]` are outliers.

use crate::ledger::{CharacterLedger, DamageTotal};
use std::fmt;

const FENCE_FACTOR: f64 = 1.5;

/// Per-axis standing of one value within its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Outlier,
    Excellent,
    Good,
    Low,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Outlier => "Outlier",
            Classification::Excellent => "Excellent",
            Classification::Good => "Good",
            Classification::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Overall standing, based on total damage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Good,
    Excellent,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Low => "Low",
            Tier::Good => "Good",
            Tier::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// `None` for an empty population.
    pub fn from_values(values: &[DamageTotal]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            q1: percentile(&sorted, 25.0)?,
            median: percentile(&sorted, 50.0)?,
            q3: percentile(&sorted, 75.0)?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn fences(&self) -> Fences {
        let spread = FENCE_FACTOR * self.iqr();
        Fences {
            lower: self.q1 - spread,
            upper: self.q3 + spread,
        }
    }

    pub fn tier(&self, value: DamageTotal) -> Tier {
        let value = value as f64;
        if value < self.q1 {
            Tier::Low
        } else if value > self.q3 {
            Tier::Excellent
        } else {
            Tier::Good
        }
    }
}

/// `p` in `[0, 100]`; `sorted` must be ascending.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// The high outlier check runs first. A value between the lower fence and q1
/// lands on `Low` and is never compared with the upper fence again.
pub fn classify(value: DamageTotal, quartiles: &Quartiles) -> Classification {
    let fences = quartiles.fences();
    let value = value as f64;
    if value > fences.upper {
        Classification::Outlier
    } else if value > quartiles.q3 {
        Classification::Excellent
    } else if value >= quartiles.q1 {
        Classification::Good
    } else if value < fences.lower {
        Classification::Outlier
    } else {
        Classification::Low
    }
}

/// Even share each of `n` characters would hold, in percent.
pub fn target_share(n: usize) -> f64 {
    if n == 0 { 0.0 } else { 100.0 / n as f64 }
}

pub fn share(part: DamageTotal, whole: DamageTotal) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    pub tier: Tier,
    pub dealt: Classification,
    pub taken: Classification,
}

/// Quartiles of total, inflicted and received damage across one population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub total: Quartiles,
    pub inflicted: Quartiles,
    pub received: Quartiles,
}

impl PopulationStats {
    pub fn compute<'a, I>(ledgers: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CharacterLedger>,
    {
        let mut totals = Vec::new();
        let mut inflicted = Vec::new();
        let mut received = Vec::new();
        for ledger in ledgers {
            totals.push(ledger.total_damage());
            inflicted.push(ledger.total_inflicted());
            received.push(ledger.total_received());
        }

        Some(Self {
            total: Quartiles::from_values(&totals)?,
            inflicted: Quartiles::from_values(&inflicted)?,
            received: Quartiles::from_values(&received)?,
        })
    }

    pub fn performance(&self, ledger: &CharacterLedger) -> Performance {
        Performance {
            tier: self.total.tier(ledger.total_damage()),
            dealt: classify(ledger.total_inflicted(), &self.inflicted),
            taken: classify(ledger.total_received(), &self.received),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(close(percentile(&sorted, 25.0).unwrap(), 1.75));
        assert!(close(percentile(&sorted, 50.0).unwrap(), 2.5));
        assert!(close(percentile(&sorted, 75.0).unwrap(), 3.25));
        assert!(close(percentile(&sorted, 0.0).unwrap(), 1.0));
        assert!(close(percentile(&sorted, 100.0).unwrap(), 4.0));
    }

    #[test]
    fn test_percentile_empty() {
        assert!(percentile(&[], 50.0).is_none());
        assert!(Quartiles::from_values(&[]).is_none());
    }

    #[test]
    fn test_quartiles_unsorted_input() {
        let q = Quartiles::from_values(&[40, 10, 30, 20, 50]).unwrap();
        assert!(close(q.q1, 20.0));
        assert!(close(q.median, 30.0));
        assert!(close(q.q3, 40.0));
        assert!(close(q.iqr(), 20.0));

        let fences = q.fences();
        assert!(close(fences.lower, -10.0));
        assert!(close(fences.upper, 70.0));
    }

    #[test]
    fn test_single_value_population() {
        let q = Quartiles::from_values(&[42]).unwrap();
        assert_eq!(q.q1, 42.0);
        assert_eq!(q.median, 42.0);
        assert_eq!(q.q3, 42.0);
        assert_eq!(q.iqr(), 0.0);
        assert_eq!(q.fences(), Fences { lower: 42.0, upper: 42.0 });

        assert_eq!(classify(42, &q), Classification::Good);
        assert_eq!(q.tier(42), Tier::Good);
    }

    #[test]
    fn test_boundaries_are_good() {
        let q = Quartiles::from_values(&[10, 20, 30, 40, 50]).unwrap();
        assert_eq!(classify(40, &q), Classification::Good);
        assert_eq!(classify(20, &q), Classification::Good);
        assert_eq!(classify(41, &q), Classification::Excellent);
        assert_eq!(classify(19, &q), Classification::Low);

        assert_eq!(q.tier(40), Tier::Good);
        assert_eq!(q.tier(20), Tier::Good);
        assert_eq!(q.tier(41), Tier::Excellent);
        assert_eq!(q.tier(19), Tier::Low);
    }

    #[test]
    fn test_fence_outliers() {
        // q1 = 100, q3 = 110, fences at 85 and 125
        let q = Quartiles::from_values(&[100, 100, 105, 110, 110]).unwrap();
        assert_eq!(classify(126, &q), Classification::Outlier);
        assert_eq!(classify(125, &q), Classification::Excellent);
        assert_eq!(classify(84, &q), Classification::Outlier);
        assert_eq!(classify(85, &q), Classification::Low);
    }

    #[test]
    fn test_precedence_is_asymmetric() {
        // Below q1 but above the lower fence is Low, even though the value is
        // far from the median. Only values under the fence are low outliers.
        let q = Quartiles {
            q1: 50.0,
            median: 60.0,
            q3: 70.0,
        };
        assert_eq!(q.fences(), Fences { lower: 20.0, upper: 100.0 });
        assert_eq!(classify(21, &q), Classification::Low);
        assert_eq!(classify(19, &q), Classification::Outlier);
        assert_eq!(classify(101, &q), Classification::Outlier);
    }

    #[test]
    fn test_target_share_and_share() {
        assert_eq!(target_share(0), 0.0);
        assert_eq!(target_share(4), 25.0);
        assert_eq!(share(5, 0), 0.0);
        assert!(close(share(10, 15), 66.666_666_666_666_67));
    }

    #[test]
    fn test_population_stats() {
        let mut a = CharacterLedger::new("A");
        a.add_inflicted("Fire", 10);
        a.add_received("Fire", 5);
        let mut b = CharacterLedger::new("B");
        b.add_inflicted("Cold", 5);
        b.add_received("Fire", 10);

        let stats = PopulationStats::compute([&a, &b]).unwrap();
        assert!(close(stats.total.q1, 15.0));
        assert!(close(stats.inflicted.q1, 6.25));
        assert!(close(stats.inflicted.q3, 8.75));

        let perf = stats.performance(&a);
        assert_eq!(perf.tier, Tier::Good);
        assert_eq!(perf.dealt, Classification::Excellent);
        assert_eq!(perf.taken, Classification::Low);
    }

    #[test]
    fn test_population_stats_empty() {
        let none: Vec<&CharacterLedger> = Vec::new();
        assert!(PopulationStats::compute(none).is_none());
    }
}
