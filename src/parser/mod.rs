pub mod blocks;
pub mod cards;
pub mod html;
pub mod records;

pub use html::translate;
pub use records::{extract_records, ExtractOptions, RecordFields};

/// Listing pipeline: document → records → card markup.
pub fn render_listing(document: &str, opts: &ExtractOptions) -> String {
    cards::render_cards(&extract_records(document, opts))
}
