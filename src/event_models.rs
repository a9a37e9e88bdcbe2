/// Label used wherever a damage type was left empty in the log.
pub const UNKNOWN_DAMAGE_TYPE: &str = "Unknown";

/// A single damage line pulled out of a combat log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageEvent {
    pub attacker: String,
    pub defender: String,
    pub damage_type: String,
    pub amount: u64,
}

impl DamageEvent {
    pub fn new(attacker: &str, defender: &str, damage_type: &str, amount: u64) -> Self {
        Self {
            attacker: attacker.to_string(),
            defender: defender.to_string(),
            damage_type: damage_type.to_string(),
            amount,
        }
    }

    pub fn is_self_damage(&self) -> bool {
        self.attacker == self.defender
    }

    pub fn type_label(&self) -> &str {
        damage_type_label(&self.damage_type)
    }
}

pub fn damage_type_label(damage_type: &str) -> &str {
    if damage_type.is_empty() {
        UNKNOWN_DAMAGE_TYPE
    } else {
        damage_type
    }
}
