use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{DisplayScale, Ranking, ScoredEntity, Summary};

const EMPTY_MESSAGE: &str = "No entities to rank.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Canonical RAI, three decimals ("0.734")
pub fn format_rai(rai: f64) -> String {
    format!("{:.3}", rai)
}

/// Display-scaled RAI, one decimal ("73.4")
pub fn format_display(value: f64) -> String {
    format!("{:.1}", value)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn format_coordinates(scored: &ScoredEntity) -> String {
    scored
        .entity
        .coordinates
        .map(|c| format!("({:.2}, {:.2})", c.latitude, c.longitude))
        .unwrap_or_default()
}

/// Format a ranking as a table with columns: Index, RAI, [Display], Name, Coordinates
/// No headers.
/// Index column: 3 chars (fits "99."), right-aligned
/// RAI column: 5 chars ("0.734"); display column: 5 chars ("100.0")
pub fn format_ranked_table(
    ranking: &Ranking,
    scale: Option<&DisplayScale>,
    use_colors: bool,
) -> String {
    if ranking.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 5;
    let separator = "  ";

    ranking
        .iter()
        .map(|entry| {
            let index_str = format!("{:>2}.", entry.rank);
            let rai_str = format!("{:>width$}", format_rai(entry.scored.rai), width = score_width);
            let display_str = scale.map(|s| {
                format!(
                    "{:>width$}",
                    format_display(s.apply(entry.scored.rai)),
                    width = score_width
                )
            });
            let coords = format_coordinates(entry.scored);

            let mut fixed_width = index_width + 1 + score_width + separator.len() * 2 + coords.len();
            if display_str.is_some() {
                fixed_width += score_width + separator.len();
            }

            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(entry.scored.id(), width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_name(entry.scored.id(), 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                entry.scored.id().to_string()
            };

            let mut line = if use_colors {
                format!("{} {}", index_str.dimmed(), rai_str.bold())
            } else {
                format!("{} {}", index_str, rai_str)
            };
            if let Some(display) = display_str {
                line.push_str(separator);
                if use_colors {
                    line.push_str(&display.cyan().to_string());
                } else {
                    line.push_str(&display);
                }
            }
            line.push_str(separator);
            line.push_str(&name);
            if !coords.is_empty() {
                line.push_str(separator);
                if use_colors {
                    line.push_str(&coords.dimmed().to_string());
                } else {
                    line.push_str(&coords);
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a ranking as tab-separated values for scripting
/// Columns: rank, id, rai, [display], then one normalized value per scoring
/// metric (no headers, no colors)
pub fn format_tsv(ranking: &Ranking, scale: Option<&DisplayScale>) -> String {
    ranking
        .iter()
        .map(|entry| {
            let mut fields = vec![
                entry.rank.to_string(),
                entry.scored.id().to_string(),
                format!("{:.6}", entry.scored.rai),
            ];
            if let Some(scale) = scale {
                fields.push(format!("{:.2}", scale.apply(entry.scored.rai)));
            }
            fields.extend(
                entry
                    .scored
                    .breakdown
                    .iter()
                    .map(|c| format!("{:.6}", c.normalized)),
            );
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one scored entity with per-metric contributions (for verbose mode)
pub fn format_breakdown(
    scored: &ScoredEntity,
    scale: Option<&DisplayScale>,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let display = scale
        .map(|s| format!(" (display {})", format_display(s.apply(scored.rai))))
        .unwrap_or_default();
    if use_colors {
        lines.push(format!("{}", scored.id().bold()));
        lines.push(format!("  RAI: {}{}", format_rai(scored.rai).green(), display));
    } else {
        lines.push(scored.id().to_string());
        lines.push(format!("  RAI: {}{}", format_rai(scored.rai), display));
    }
    for c in &scored.breakdown {
        lines.push(format!(
            "  {}: {} -> {:.3} x {:.3} = {:.3}",
            c.metric, c.raw, c.normalized, c.weight, c.contribution
        ));
    }
    if let Some(coords) = scored.entity.coordinates {
        lines.push(format!(
            "  Coordinates: {}, {}",
            coords.latitude, coords.longitude
        ));
    }
    for (name, value) in &scored.entity.extra {
        lines.push(format!("  {}: {}", name, value));
    }
    lines.join("\n")
}

/// Format headline statistics: top entity, highest and mean RAI, count
pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let top = if use_colors {
        summary.top.bold().to_string()
    } else {
        summary.top.clone()
    };
    format!(
        "Highest RAI: {} ({})\nLowest RAI: {}\nAverage RAI: {}\nEntities: {}",
        format_rai(summary.highest),
        top,
        format_rai(summary.lowest),
        format_rai(summary.mean),
        summary.count
    )
}
