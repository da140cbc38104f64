//! Plain-text rendering for the CLI. Pure functions from data to `String`.

use std::fmt::Write;

use crate::catalog::{Attack, CatalogEntry, PageResponse, SetSummary, TypeModifier};
use crate::core::energy::{Rgb, energy_symbol, type_color};
use crate::core::projection::CardView;
use crate::core::state::CardList;

const WRAP_WIDTH: usize = 72;
const TEXT_INDENT: &str = "      ";

/// Wraps `text` in a 24-bit ANSI foreground color.
fn paint(text: &str, color: Rgb) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "\x1b[38;2;{};{};{}m{}\x1b[0m",
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        text
    )
}

fn type_badges(types: &[String], color: bool) -> String {
    types
        .iter()
        .map(|t| if color { paint(t, type_color(t)) } else { t.clone() })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `🔥🔥[C]` for a Fire/Fire/Colorless cost.
fn energy_cost(cost: &[String]) -> String {
    cost.iter()
        .map(|kind| match energy_symbol(kind) {
            Some(symbol) => symbol.to_string(),
            None => format!("[{}]", kind.chars().next().unwrap_or('?')),
        })
        .collect()
}

fn modifiers(label: &str, list: Option<&[TypeModifier]>) -> Option<String> {
    let list = list.filter(|l| !l.is_empty())?;
    let joined = list
        .iter()
        .map(|m| format!("{} {}", m.kind, m.value))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("{label}: {joined}"))
}

fn attack_block(out: &mut String, attack: &Attack) {
    let cost = attack.cost.as_deref().map(energy_cost).unwrap_or_default();
    let name = attack.name.as_deref().unwrap_or("Unnamed attack");
    let damage = attack.damage.as_deref().unwrap_or("");
    let header = format!("  {cost} {name} {damage}");
    let _ = writeln!(out, "{}", header.trim_end());
    if let Some(text) = attack.text.as_deref().filter(|t| !t.is_empty()) {
        let options = textwrap::Options::new(WRAP_WIDTH)
            .initial_indent(TEXT_INDENT)
            .subsequent_indent(TEXT_INDENT);
        for line in textwrap::wrap(text, options) {
            let _ = writeln!(out, "{line}");
        }
    }
}

pub fn card_list(state: &CardList, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.display_title());
    let _ = writeln!(out, "{}", state.result_count_text());
    for entry in &state.entries {
        let view = CardView::from_entry(entry);
        let _ = write!(out, "{:<14} {}", view.id, view.display_name());
        if let Some(hp) = &view.hp {
            let _ = write!(out, "  {hp} HP");
        }
        if view.has_types() {
            let _ = write!(out, "  {}", type_badges(&view.types, color));
        }
        if let Some(price) = view.formatted_market_price() {
            let _ = write!(out, "  {price}");
        }
        out.push('\n');
    }
    if state.has_more_pages && !state.is_empty() {
        let _ = writeln!(
            out,
            "(showing {} of {}; use --pages to load more)",
            state.entries.len(),
            state.total_count
        );
    }
    out
}

pub fn card_detail(entry: &CatalogEntry, color: bool) -> String {
    let view = CardView::from_entry(entry);
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.display_name());
    let _ = writeln!(out, "{}", view.card_identifier());
    let kind = [view.supertype.as_deref(), view.rarity.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    if !kind.is_empty() {
        let _ = writeln!(out, "{kind}");
    }
    if let Some(hp) = &view.hp {
        let _ = writeln!(out, "HP {hp}");
    }
    if view.has_types() {
        let _ = writeln!(out, "Types: {}", type_badges(&view.types, color));
    }
    if view.has_attacks() {
        let _ = writeln!(out, "Attacks ({}):", view.attack_count());
        for attack in &view.attacks {
            attack_block(&mut out, attack);
        }
    }
    for line in [
        modifiers("Weakness", entry.weaknesses.as_deref()),
        modifiers("Resistance", entry.resistances.as_deref()),
    ]
    .into_iter()
    .flatten()
    {
        let _ = writeln!(out, "{line}");
    }
    if view.has_set_info() {
        let set_name = view.display_set_name().unwrap_or_default();
        let series = view.set_series.as_deref().unwrap_or("");
        let _ = writeln!(out, "Set: {set_name} ({series})");
        if let Some(set) = &entry.set
            && let Some(date) = set.release_date()
        {
            let _ = writeln!(out, "Released: {}", date.format("%B %-d, %Y"));
        }
    }
    if let Some(price) = view.formatted_market_price() {
        let _ = writeln!(out, "Market: {price}");
    }
    if let Some(artist) = &view.artist {
        let _ = writeln!(out, "Illus. {artist}");
    }
    let _ = writeln!(out, "{}", view.share_url());
    out
}

pub fn set_list(page: &PageResponse<SetSummary>) -> String {
    let mut out = String::new();
    for set in &page.data {
        let name = set.name.as_deref().unwrap_or("Unknown");
        let series = set.series.as_deref().unwrap_or("");
        let _ = write!(out, "{:<10} {name}", set.id);
        if !series.is_empty() {
            let _ = write!(out, " ({series})");
        }
        if let Some(date) = set.release_date() {
            let _ = write!(out, "  {}", date.format("%Y-%m-%d"));
        }
        out.push('\n');
    }
    out.push_str(&page_footer(page, "sets"));
    out
}

pub fn set_detail(set: &SetSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", set.name.as_deref().unwrap_or("Unknown"));
    if let Some(series) = &set.series {
        let _ = writeln!(out, "Series: {series}");
    }
    match (set.printed_total, set.total) {
        (Some(printed), Some(total)) if printed < total => {
            let _ = writeln!(out, "Cards: {printed} (+{} secret)", total - printed);
        }
        (_, Some(total)) | (Some(total), None) => {
            let _ = writeln!(out, "Cards: {total}");
        }
        (None, None) => {}
    }
    if let Some(date) = set.release_date() {
        let _ = writeln!(out, "Released: {}", date.format("%B %-d, %Y"));
    }
    if let Some(code) = &set.ptcgo_code {
        let _ = writeln!(out, "PTCGO code: {code}");
    }
    out
}

pub fn entry_page(page: &PageResponse<CatalogEntry>, color: bool) -> String {
    let mut out = String::new();
    for entry in &page.data {
        let view = CardView::from_entry(entry);
        let _ = write!(out, "{:<14} {}", view.id, view.display_name());
        if view.has_types() {
            let _ = write!(out, "  {}", type_badges(&view.types, color));
        }
        out.push('\n');
    }
    out.push_str(&page_footer(page, "cards"));
    out
}

fn page_footer<T>(page: &PageResponse<T>, noun: &str) -> String {
    let mut footer = format!(
        "page {} · {} of {} {noun}\n",
        page.page, page.count, page.total_count
    );
    if page.has_more_after(page.page) {
        let _ = writeln!(footer, "(more with --page {})", page.page + 1);
    }
    footer
}
