pub mod formatter;

pub use formatter::{format_summary_table, should_use_colors};
