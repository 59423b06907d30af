//! Markdown and code-highlight boundary.
//!
//! Docs of the tree, rules, params and examples are markdown. Fenced code blocks that
//! carry a language tag are handed to `MarkupRenderer::highlight`; everything else is
//! rendered by `comrak` with the GitHub extensions the docs rely on.

use comrak::nodes::{NodeHtmlBlock, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};

pub trait MarkupRenderer {
    /// Markdown to HTML.
    fn render(&self, text: &str) -> String;

    /// Source code to HTML.
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// `comrak` markdown with pluggable highlighting.
pub struct ComrakMarkup<H = PlainHighlighter> {
    highlighter: H,
}

pub trait Highlight {
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// Escapes the code and tags it with its language, leaving coloring to CSS.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl Highlight for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> String {
        format!(
            "<pre class=\"code language-{}\"><code>{}</code></pre>\n",
            escape_html(language),
            escape_html(code.strip_suffix('\n').unwrap_or(code))
        )
    }
}

impl<F> Highlight for F
where
    F: Fn(&str, &str) -> String,
{
    fn highlight(&self, code: &str, language: &str) -> String {
        self(code, language)
    }
}

impl ComrakMarkup<PlainHighlighter> {
    pub fn new() -> Self {
        Self::with_highlighter(PlainHighlighter)
    }
}

impl Default for ComrakMarkup<PlainHighlighter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Highlight> ComrakMarkup<H> {
    pub fn with_highlighter(highlighter: H) -> Self {
        Self { highlighter }
    }
}

fn enable_extensions(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    // Highlighted code is spliced in as raw HTML blocks.
    options.render.unsafe_ = true;
}

impl<H: Highlight> MarkupRenderer for ComrakMarkup<H> {
    fn render(&self, text: &str) -> String {
        let mut options = Options::default();
        enable_extensions(&mut options);
        let arena = Arena::new();
        let root = parse_document(&arena, text, &options);

        for node in root.descendants() {
            let mut ast = node.data.borrow_mut();
            let highlighted = match &ast.value {
                NodeValue::CodeBlock(block) => {
                    let language = block.info.split_whitespace().next().unwrap_or_default();
                    if language.is_empty() {
                        None
                    } else {
                        Some(self.highlighter.highlight(&block.literal, language))
                    }
                }
                _ => None,
            };
            if let Some(html) = highlighted {
                ast.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal: html,
                });
            }
        }

        let mut html = Vec::new();
        if let Err(error) = format_html(root, &options, &mut html) {
            log::error!("Failed to render markdown: {error}");
            return format!("<pre>{}</pre>", escape_html(text));
        }
        String::from_utf8_lossy(&html).into_owned()
    }

    fn highlight(&self, code: &str, language: &str) -> String {
        self.highlighter.highlight(code, language)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = Vec::with_capacity(text.len());
    if let Err(error) = comrak::html::escape(&mut escaped, text.as_bytes()) {
        log::error!("Failed to escape HTML: {error}");
        return String::new();
    }
    String::from_utf8_lossy(&escaped).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_gfm_markdown() {
        let html = ComrakMarkup::new().render("Use `attr` ~~not~~ here\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<code>attr</code>"));
        assert!(html.contains("<del>not</del>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn tagged_code_blocks_go_through_the_highlighter() {
        let markup = ComrakMarkup::with_highlighter(|code: &str, language: &str| {
            format!("<div data-lang=\"{language}\">{}</div>", code.trim_end())
        });
        let html = markup.render("```python\ntransformer = Transformer(template)\n```\n");
        assert!(html.contains("<div data-lang=\"python\">transformer = Transformer(template)</div>"));
    }

    #[test]
    fn untagged_code_blocks_stay_plain() {
        let html = ComrakMarkup::new().render("```\n{\"$\": \"this\"}\n```\n");
        assert!(html.contains("<pre><code>"));
        assert!(html.contains("&quot;$&quot;"));
    }

    #[test]
    fn plain_highlighter_escapes_code() {
        let html = ComrakMarkup::new().highlight("a < b\n", "json");
        assert_eq!(html, "<pre class=\"code language-json\"><code>a &lt; b</code></pre>\n");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }
}
