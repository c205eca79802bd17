use super::blocks::{classify_blocks, Block, Inline};

const IMAGE_STYLE: &str = "max-width:100%;border-radius:6px";

/// Translate a whole document into one HTML string, block by block.
///
/// Fragments are concatenated with no separator. Content is inserted as-is:
/// input is trusted and nothing is escaped.
pub fn translate(document: &str) -> String {
    let mut html = String::with_capacity(document.len() * 2);
    for block in classify_blocks(document) {
        render_block(&block, &mut html);
    }
    html
}

pub fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            out.push_str(&format!("<h{level}>{text}</h{level}>"));
        }
        Block::List { items } => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                out.push_str(item);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Block::Image { alt, url } => {
            out.push_str(&format!(r#"<img alt="{alt}" src="{url}" style="{IMAGE_STYLE}">"#));
        }
        Block::Paragraph(inlines) => {
            out.push_str("<p>");
            for inline in inlines {
                render_inline(inline, out);
            }
            out.push_str("</p>");
        }
    }
}

fn render_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(t) => out.push_str(t),
        // target=_blank without opener access
        Inline::Link { text, url } => {
            out.push_str(&format!(r#"<a href="{url}" target="_blank" rel="noopener">{text}</a>"#));
        }
        Inline::LineBreak => out.push_str("<br>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading() {
        assert_eq!(translate("### Title"), "<h3>Title</h3>");
    }

    #[test]
    fn list() {
        assert_eq!(translate("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn image_is_exclusive() {
        let html = translate("![x](y.png)");
        assert_eq!(
            html,
            r#"<img alt="x" src="y.png" style="max-width:100%;border-radius:6px">"#
        );
        assert!(!html.contains("<p>"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn paragraph_link() {
        assert_eq!(
            translate("see [here](http://e.com)"),
            r#"<p>see <a href="http://e.com" target="_blank" rel="noopener">here</a></p>"#
        );
    }

    #[test]
    fn paragraph_line_breaks() {
        assert_eq!(translate("one\ntwo\nthree"), "<p>one<br>two<br>three</p>");
    }

    #[test]
    fn empty_document() {
        assert_eq!(translate(""), "");
    }

    #[test]
    fn whitespace_block_kept_as_paragraph() {
        assert_eq!(translate("a\n\n  \n\nb"), "<p>a</p><p>  </p><p>b</p>");
    }

    #[test]
    fn blocks_concatenate_in_order() {
        let md = "# Hi\n\nIntro text\n\n- x\n- y\n\n![pic](p.jpg)";
        assert_eq!(
            translate(md),
            concat!(
                "<h1>Hi</h1>",
                "<p>Intro text</p>",
                "<ul><li>x</li><li>y</li></ul>",
                r#"<img alt="pic" src="p.jpg" style="max-width:100%;border-radius:6px">"#,
            )
        );
    }

    #[test]
    fn markup_is_not_escaped() {
        assert_eq!(translate("a <b>bold</b> & c"), "<p>a <b>bold</b> & c</p>");
    }

    #[test]
    fn about_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/about.md").unwrap();
        let html = translate(&md);
        assert!(html.starts_with("<h1>About me</h1>"));
        assert!(html.contains(r#"rel="noopener""#));
        assert!(html.contains("<ul><li>"));
        assert!(html.contains("<img alt="));
    }
}
