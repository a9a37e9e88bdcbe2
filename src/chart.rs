//! Plain-text stacked bars for the chart rows, one bar per character.

use crate::ledger::DamageTotal;
use crate::report::{ChartRow, Series};
use hashbrown::HashMap;
use std::fmt::{self, Write};

const SEGMENT_GLYPHS: &[char] = &['#', '=', '*', '+', '%', '@', '~', 'o'];

type Bar<'a> = (&'a str, Vec<(&'a str, DamageTotal)>);

pub fn render_chart(rows: &[ChartRow], series: Series, width: usize) -> String {
    let mut characters: Vec<Bar<'_>> = Vec::new();
    let mut glyphs: HashMap<&str, char> = HashMap::new();

    for row in rows {
        let Some(amount) = row.amount(series) else {
            continue;
        };
        let next_glyph = SEGMENT_GLYPHS[glyphs.len() % SEGMENT_GLYPHS.len()];
        glyphs.entry(row.damage_type.as_str()).or_insert(next_glyph);

        match characters.iter_mut().find(|(name, _)| *name == row.character) {
            Some((_, segments)) => segments.push((row.damage_type.as_str(), amount)),
            None => characters.push((row.character.as_str(), vec![(row.damage_type.as_str(), amount)])),
        }
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_chart(&mut out, series, &characters, &glyphs, width);
    out
}

fn write_chart<W: Write>(
    out: &mut W,
    series: Series,
    characters: &[Bar<'_>],
    glyphs: &HashMap<&str, char>,
    width: usize,
) -> fmt::Result {
    writeln!(out, "{}", series.title())?;
    if characters.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let largest = characters
        .iter()
        .map(|(_, segments)| segments.iter().map(|(_, amount)| amount).sum::<DamageTotal>())
        .max()
        .unwrap_or(0);
    let label_width = characters.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    for (name, segments) in characters {
        let total: DamageTotal = segments.iter().map(|(_, amount)| amount).sum();
        let mut bar = String::new();
        for (damage_type, amount) in segments {
            let glyph = glyphs.get(damage_type).copied().unwrap_or('#');
            let len = scaled(*amount, largest, width);
            bar.extend(std::iter::repeat_n(glyph, len));
        }
        writeln!(out, "  {name:<label_width$} |{bar} {total}")?;
    }

    let mut legend: Vec<(&str, char)> = glyphs.iter().map(|(t, g)| (*t, *g)).collect();
    legend.sort_by_key(|&(_, glyph)| SEGMENT_GLYPHS.iter().position(|g| *g == glyph));
    let legend = legend
        .iter()
        .map(|(damage_type, glyph)| format!("{glyph} {damage_type}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "  {legend}")
}

fn scaled(amount: DamageTotal, largest: DamageTotal, width: usize) -> usize {
    if largest == 0 {
        return 0;
    }
    ((amount as f64 / largest as f64) * width as f64).round() as usize
}
