use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)").unwrap());
static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+").unwrap());
static IMAGE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\[([^\]\n]*)\]\(([^)\n]*)\)$").unwrap());
static INLINE_LINKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Separator between blocks: exactly one blank line.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    List { items: Vec<String> },
    Image { alt: String, url: String },
    Paragraph(Vec<Inline>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Link { text: String, url: String },
    LineBreak,
}

/// Drop carriage returns so CRLF documents split the same way as LF ones.
pub fn normalize(document: &str) -> String {
    document.replace('\r', "")
}

/// Split a document on blank lines and classify every block, in order.
///
/// An empty document has no blocks. Any other document yields exactly
/// `document.split("\n\n").count()` blocks, whitespace-only ones included.
pub fn classify_blocks(document: &str) -> Vec<Block> {
    let document = normalize(document);
    if document.is_empty() {
        return Vec::new();
    }

    document.split(BLOCK_SEPARATOR).map(classify_block).collect()
}

/// Classify one block. Priority: heading, list, image, paragraph.
pub fn classify_block(block: &str) -> Block {
    // ── Heading: ### text (only the first line is consulted) ──
    if let Some(caps) = HEADING_RE.captures(block) {
        return Block::Heading {
            level: caps[1].len() as u8,
            text: caps[2].to_string(),
        };
    }

    // ── List: - item / * item, every line becomes an item ──
    if LIST_MARKER_RE.is_match(block) {
        let items = block
            .split('\n')
            .map(|line| LIST_MARKER_RE.replace(line, "").into_owned())
            .collect();
        return Block::List { items };
    }

    // ── Image: the whole block is a single ![alt](url) ──
    if let Some(caps) = IMAGE_BLOCK_RE.captures(block.trim()) {
        return Block::Image {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        };
    }

    Block::Paragraph(parse_inlines(block))
}

/// Break paragraph text into plain runs, inline links and line breaks.
fn parse_inlines(block: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();

    for (i, line) in block.split('\n').enumerate() {
        if i > 0 {
            inlines.push(Inline::LineBreak);
        }

        let mut last = 0;
        for caps in INLINE_LINKS_RE.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                inlines.push(Inline::Text(line[last..whole.start()].to_string()));
            }
            inlines.push(Inline::Link {
                text: caps[1].to_string(),
                url: caps[2].to_string(),
            });
            last = whole.end();
        }
        if last < line.len() {
            inlines.push(Inline::Text(line[last..].to_string()));
        }
    }

    inlines
}
