use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::blocks::normalize;

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static TITLE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]*(.*)\n?").unwrap());

pub const DEFAULT_SEPARATOR: &str = "---";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/420x300?text=Project";

/// Constants the caller owns: the separator line and the two fallbacks.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub separator: String,
    pub default_title: String,
    pub placeholder_image: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub title: String,
    pub image_url: String,
    pub excerpt: String,
}

/// Split a listing into records on lines that are exactly the separator.
///
/// The split is literal on `"\n" + separator + "\n"`: a separator on the very
/// first or last line of the document has no newline on one side and is left
/// in place, and of two consecutive separator lines only the first splits
/// (the second stays at the head of the next record). An empty document is
/// one empty record.
pub fn split_records(document: &str, separator: &str) -> Vec<String> {
    let document = normalize(document);
    let delimiter = format!("\n{separator}\n");
    document.split(delimiter.as_str()).map(str::to_string).collect()
}

/// Derive title, image and excerpt from one record's raw text.
pub fn extract_fields(record: &str, opts: &ExtractOptions) -> RecordFields {
    let image_url = IMAGE_RE
        .captures(record)
        .map(|c| c[2].to_string())
        .unwrap_or_else(|| opts.placeholder_image.clone());

    let title_match = TITLE_LINE_RE.captures(record);
    let title = title_match
        .as_ref()
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| opts.default_title.clone());

    // Only the first heading line and the first image are stripped.
    let without_heading = match title_match.as_ref().and_then(|c| c.get(0)) {
        Some(m) => format!("{}{}", &record[..m.start()], &record[m.end()..]),
        None => record.to_string(),
    };
    let excerpt = IMAGE_RE.replace(&without_heading, "").trim().to_string();

    RecordFields {
        title,
        image_url,
        excerpt,
    }
}

/// Split a listing document and extract fields from every record, in order.
pub fn extract_records(document: &str, opts: &ExtractOptions) -> Vec<RecordFields> {
    split_records(document, &opts.separator)
        .iter()
        .map(|record| extract_fields(record, opts))
        .collect()
}
