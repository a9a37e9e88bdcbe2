use crate::event_models::DamageEvent;
use memchr::memmem;


const DEFENDER_TAG: &str = "Defender: ";
const ATTACKER_DELIM: &str = ", Attacker: ";
const TYPE_DELIM: &str = ", Type: ";
const DAMAGE_DELIM: &str = ", Damage: ";
const CAUSE_DELIM: &str = ", Cause: ";

/// Lazily parse every line of every block, in input order. Lines that do not
/// carry a damage record are skipped.
pub fn parse_events<'a, I>(blocks: I) -> impl Iterator<Item = DamageEvent> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    blocks
        .into_iter()
        .flat_map(|block| block.lines())
        .filter_map(parse_line)
}

// Defender: Gale, Attacker: Shadowheart, Type: Fire, Damage: 10, Cause: Spell
// Defender: Shadowheart, Attacker: Gale, Type: , Damage: 5, Cause: Melee
// [12:01] Defender: Karlach, Attacker: Lae'zel, Type: Slashing, Damage: 7, Cause: Weapon

/// The record may sit anywhere in the line. When one `Defender: ` occurrence
/// does not lead to a full record, later occurrences are tried.
pub fn parse_line(line: &str) -> Option<DamageEvent> {
    memmem::find_iter(line.as_bytes(), DEFENDER_TAG.as_bytes())
        .find_map(|pos| parse_record(&line[pos + DEFENDER_TAG.len()..]))
}

fn parse_record(input: &str) -> Option<DamageEvent> {
    let (remaining, defender) = parse_name(input, ATTACKER_DELIM)?;
    let (remaining, attacker) = parse_name(remaining, TYPE_DELIM)?;
    let (remaining, damage_type) = parse_damage_type(remaining)?;
    let (remaining, amount) = parse_amount(remaining)?;
    parse_cause(remaining)?;

    Some(DamageEvent {
        attacker: attacker.to_string(),
        defender: defender.to_string(),
        damage_type: damage_type.to_string(),
        amount,
    })
}

/// Character name up to `delim`, trimmed. Returns the input after the delimiter.
pub fn parse_name<'a>(input: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let (name, remaining) = take_field(input, is_name_char, delim)?;
    if name.is_empty() {
        return None;
    }
    Some((remaining, name.trim()))
}

pub fn parse_damage_type(input: &str) -> Option<(&str, &str)> {
    let (damage_type, remaining) = take_field(input, is_word_char, DAMAGE_DELIM)?;
    Some((remaining, damage_type))
}

/// Digits only. A value that overflows `u64` is treated like any other
/// malformed amount.
pub fn parse_amount(input: &str) -> Option<(&str, u64)> {
    let (digits, remaining) = take_field(input, |c| c.is_ascii_digit(), CAUSE_DELIM)?;
    if digits.is_empty() {
        return None;
    }
    let amount = digits.parse::<u64>().ok()?;
    Some((remaining, amount))
}

pub fn parse_cause(input: &str) -> Option<&str> {
    let end = input
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(input.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    Some(&input[..end])
}

// None of the field classes contain ',', so the longest run is the only
// candidate that can be followed by the delimiter.
fn take_field<'a>(
    input: &'a str,
    accept: impl Fn(char) -> bool,
    delim: &str,
) -> Option<(&'a str, &'a str)> {
    let end = input
        .char_indices()
        .find(|&(_, c)| !accept(c))
        .map_or(input.len(), |(i, _)| i);
    let remaining = input[end..].strip_prefix(delim)?;
    Some((&input[..end], remaining))
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_name_char(c: char) -> bool {
    is_word_char(c) || c.is_whitespace() || c == '\''
}
