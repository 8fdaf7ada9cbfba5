//! Save display formatting
//!
//! Formats a save document for terminal output: world stats, then one
//! table row per player with health and every upgrade.

use crate::document::{PlayerField, RunStat, SaveDocument, Upgrade};
use crate::merge::FieldWarning;
use crate::services::SaveSummary;

/// Format the world section (run stats and team name)
pub fn format_world(doc: &SaveDocument) -> String {
    let label_width = RunStat::ALL
        .iter()
        .map(|s| s.key().len())
        .chain(std::iter::once("teamName".len()))
        .max()
        .unwrap_or(8);

    let mut output = String::new();
    output.push_str("World\n");
    output.push_str(&format!("{:-<width$}\n", "", width = label_width + 14));
    for stat in RunStat::ALL {
        output.push_str(&format!(
            "{:<label_width$}  {:>12}\n",
            stat.key(),
            doc.run_stat(*stat),
            label_width = label_width,
        ));
    }
    output.push_str(&format!(
        "{:<label_width$}  {}\n",
        "teamName",
        doc.team_name(),
        label_width = label_width,
    ));
    output
}

/// Format the player table
pub fn format_players(doc: &SaveDocument) -> String {
    let players = doc.players();
    if players.is_empty() {
        return "No players found.\n".to_string();
    }

    let name_width = players
        .iter()
        .map(|p| display_name(&p.name, &p.id).chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let columns: Vec<(String, PlayerField)> = std::iter::once(("Health".to_string(), PlayerField::Health))
        .chain(
            Upgrade::ALL
                .iter()
                .map(|u| (u.key().to_string(), PlayerField::Upgrade(*u))),
        )
        .collect();

    let mut output = String::new();
    output.push_str(&format!("{:<name_width$}", "Player", name_width = name_width));
    for (label, _) in &columns {
        output.push_str(&format!("  {:>w$}", label, w = label.len().max(4)));
    }
    output.push('\n');

    output.push_str(&format!("{:-<name_width$}", "", name_width = name_width));
    for (label, _) in &columns {
        output.push_str(&format!("  {:-<w$}", "", w = label.len().max(4)));
    }
    output.push('\n');

    for player in &players {
        output.push_str(&format!(
            "{:<name_width$}",
            display_name(&player.name, &player.id),
            name_width = name_width
        ));
        for (label, field) in &columns {
            output.push_str(&format!(
                "  {:>w$}",
                doc.player_value(*field, &player.id),
                w = label.len().max(4)
            ));
        }
        output.push('\n');
    }
    output
}

/// Format the full view shown by `reposave show`
pub fn format_document(doc: &SaveDocument) -> String {
    format!("{}\n{}", format_world(doc), format_players(doc))
}

/// One-line summary for listings
pub fn format_summary(summary: &SaveSummary) -> String {
    format!(
        "Level {} | Team: {} | Players: {}",
        summary.level,
        if summary.team_name.is_empty() { "-" } else { summary.team_name.as_str() },
        summary.player_list()
    )
}

/// Format skipped-edit warnings, one per line
pub fn format_warnings(warnings: &[FieldWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!("Warning: {}\n", w))
        .collect()
}

fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() {
        id
    } else {
        name
    }
}
