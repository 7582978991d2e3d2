pub mod clipboard;
pub mod file;
pub mod html;
pub mod table;
pub mod text;

pub use clipboard::{copy_summary, CopyOutcome};
pub use file::write_summary_files;
pub use html::render_html_table;
pub use table::{summary_rows, SummaryRow, HEADER};
pub use text::render_text_table;
