//! Markdown rendering for local post bodies.

use std::sync::Arc;

use comrak::{Arena, format_html, options::Options, parse_document};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to format markdown as html")]
    Format(#[from] std::fmt::Error),
}

/// Comrak with GFM extensions, followed by Ammonia sanitisation.
pub struct MarkdownRenderer {
    options: Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_sanitizer(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html)?;
        Ok(self.sanitizer.clean(&html).to_string())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;
    ext.front_matter_delimiter = Some("---".to_string());

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.r#unsafe = true;

    options
}

fn build_sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder.add_tags(&["input"]);
    builder.add_tag_attributes("code", &["class"]);
    builder.add_tag_attributes("pre", &["lang"]);
    builder.add_tag_attributes("th", &["align"]);
    builder.add_tag_attributes("td", &["align"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_gfm_tables_and_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("| a |\n|---|\n| b |\n\n~~gone~~")
            .expect("renders");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn strips_scripts_from_raw_html() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("hello <script>alert(1)</script>")
            .expect("renders");
        assert!(html.contains("hello"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn front_matter_is_not_rendered() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("---\ntitle: Hidden\n---\n\nBody text")
            .expect("renders");
        assert!(!html.contains("Hidden"));
        assert!(html.contains("Body text"));
    }
}
