use crate::event_models::{DamageEvent, damage_type_label};
use hashbrown::HashMap;

/// Running damage sum. Each event carries at most `u64::MAX`, so a batch
/// would need more than `u64::MAX` events to overflow it.
pub type DamageTotal = u128;

/// Damage amounts keyed by damage type, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBreakdown {
    entries: Vec<(String, DamageTotal)>,
}

impl TypeBreakdown {
    fn add(&mut self, damage_type: &str, amount: u64) {
        let amount = DamageTotal::from(amount);
        match self.entries.iter_mut().find(|(t, _)| t == damage_type) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((damage_type.to_string(), amount)),
        }
    }

    pub fn get(&self, damage_type: &str) -> DamageTotal {
        self.entries
            .iter()
            .find(|(t, _)| t == damage_type)
            .map_or(0, |(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DamageTotal)> {
        self.entries.iter().map(|(t, amount)| (t.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> DamageTotal {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    /// Largest first, ties kept in first-seen order, zero amounts dropped.
    pub fn ranked(&self) -> Vec<(&str, DamageTotal)> {
        let mut ranked: Vec<(&str, DamageTotal)> = self.iter().filter(|&(_, amount)| amount > 0).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Running damage totals for one character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterLedger {
    name: String,
    total_inflicted: DamageTotal,
    inflicted_by_type: TypeBreakdown,
    total_received: DamageTotal,
    received_by_type: TypeBreakdown,
}

impl CharacterLedger {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_inflicted(&self) -> DamageTotal {
        self.total_inflicted
    }

    pub fn total_received(&self) -> DamageTotal {
        self.total_received
    }

    pub fn total_damage(&self) -> DamageTotal {
        self.total_inflicted + self.total_received
    }

    pub fn inflicted_by_type(&self) -> &TypeBreakdown {
        &self.inflicted_by_type
    }

    pub fn received_by_type(&self) -> &TypeBreakdown {
        &self.received_by_type
    }

    pub fn add_inflicted(&mut self, damage_type: &str, amount: u64) {
        self.total_inflicted += DamageTotal::from(amount);
        self.inflicted_by_type
            .add(damage_type_label(damage_type), amount);
    }

    pub fn add_received(&mut self, damage_type: &str, amount: u64) {
        self.total_received += DamageTotal::from(amount);
        self.received_by_type
            .add(damage_type_label(damage_type), amount);
    }
}

/// Every character seen in a batch of logs, in order of first mention.
#[derive(Debug, Clone, Default)]
pub struct DamageLedgerSet {
    ledgers: Vec<CharacterLedger>,
    index: HashMap<String, usize>,
}

impl DamageLedgerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = DamageEvent>,
    {
        let mut set = Self::new();
        set.extend(events);
        set
    }

    pub fn get_or_create(&mut self, name: &str) -> &mut CharacterLedger {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.ledgers.len();
                self.ledgers.push(CharacterLedger::new(name));
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.ledgers[idx]
    }

    /// The attacker is touched before the defender, which fixes the order
    /// new characters are listed in.
    pub fn record(&mut self, event: &DamageEvent) {
        self.get_or_create(&event.attacker)
            .add_inflicted(&event.damage_type, event.amount);
        self.get_or_create(&event.defender)
            .add_received(&event.damage_type, event.amount);
    }

    pub fn get(&self, name: &str) -> Option<&CharacterLedger> {
        self.index.get(name).map(|&idx| &self.ledgers[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterLedger> {
        self.ledgers.iter()
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    pub fn total_inflicted(&self) -> DamageTotal {
        self.ledgers.iter().map(CharacterLedger::total_inflicted).sum()
    }
}

impl Extend<DamageEvent> for DamageLedgerSet {
    fn extend<I: IntoIterator<Item = DamageEvent>>(&mut self, events: I) {
        for event in events {
            self.record(&event);
        }
    }
}
