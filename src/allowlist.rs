use crate::ledger::DamageLedgerSet;

/// Party members named by the user. Only narrows what is reported; the
/// ledgers themselves are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    names: Vec<String>,
}

impl Allowlist {
    /// Comma separated, trimmed. Blank entries and repeats are dropped.
    /// Returns `None` when no name is left.
    pub fn parse(input: &str) -> Option<Self> {
        let mut names: Vec<String> = Vec::new();
        for name in input.split(',').map(str::trim) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Removes names that never appear in `ledgers` and returns them in the
    /// order they were given.
    pub fn retain_known(&mut self, ledgers: &DamageLedgerSet) -> Vec<String> {
        let (known, missing): (Vec<String>, Vec<String>) = std::mem::take(&mut self.names)
            .into_iter()
            .partition(|name| ledgers.contains(name));
        self.names = known;
        missing
    }
}
