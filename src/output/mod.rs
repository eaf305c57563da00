pub mod export;
pub mod formatter;

pub use export::{ranked_rows, to_json, RankedRow};
pub use formatter::{
    format_breakdown, format_display, format_rai, format_ranked_table, format_summary, format_tsv,
    should_use_colors,
};
