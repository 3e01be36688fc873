//! Document scaffolding around the converted content.
//!
//! Each stage is gated by [`ConvertScope`](rtf_html_config::ConvertScope):
//!
//! ```text
//! <!DOCTYPE html>          scope.document
//! <html>                   scope.html
//!   <head>...</head>       scope.head
//!   <body>                 scope.body
//!     ...                  scope.content
//!   </body>
//! </html>
//! ```

use rtf_html_config::{CssRule, HtmlSettings};

use crate::backend::{Tag, TagBackend};
use crate::converter::{HtmlConverter, TraversalState};
use crate::visual::Document;
use crate::writer::{MarkupSink, WriteError};

const STYLE_NEWLINE: &str = "\r\n";

impl<B: TagBackend> HtmlConverter<B> {
    pub(crate) fn render_document<'d>(
        &self,
        document: &'d Document,
        state: &mut TraversalState<'d>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        let scope = &self.settings().scope;

        if scope.document {
            out.doc_type(B::DOC_TYPE)?;
        }
        if scope.html {
            state.begin::<B>(Tag::Html, out)?;
        }
        if scope.head {
            render_head::<B>(self.settings(), state, out)?;
        }
        if scope.body {
            state.begin::<B>(Tag::Body, out)?;
        }
        if scope.content {
            self.render_content(document, state, out)?;
        }
        if scope.body {
            state.end::<B>(out)?;
        }
        if scope.html {
            state.end::<B>(out)?;
        }
        Ok(())
    }
}

fn render_head<B: TagBackend>(
    settings: &HtmlSettings,
    state: &mut TraversalState<'_>,
    out: &mut dyn MarkupSink,
) -> Result<(), WriteError> {
    state.begin::<B>(Tag::Head, out)?;

    let content_type = match settings.character_set.as_deref().filter(|c| !c.is_empty()) {
        Some(charset) => format!("text/html; charset={charset}"),
        None => "text/html".to_owned(),
    };
    state.begin::<B>(Tag::Meta, out)?;
    out.attribute("http-equiv", "content-type")?;
    out.attribute("content", &content_type)?;
    state.end::<B>(out)?;

    for href in settings.stylesheet_links.iter().filter(|href| !href.is_empty()) {
        state.begin::<B>(Tag::Link, out)?;
        out.attribute("rel", "stylesheet")?;
        out.attribute("type", "text/css")?;
        out.attribute("href", href)?;
        state.end::<B>(out)?;
    }

    if let Some(title) = settings.title.as_deref().filter(|t| !t.is_empty()) {
        state.begin::<B>(Tag::Title, out)?;
        out.text(title)?;
        state.end::<B>(out)?;
    }

    if settings.has_styles() {
        state.begin::<B>(Tag::Style, out)?;
        render_style_rules(&settings.styles, out)?;
        state.end::<B>(out)?;
    }

    state.end::<B>(out)
}

/// Write rule blocks separated by a blank line, one declaration per line.
fn render_style_rules(rules: &[CssRule], out: &mut dyn MarkupSink) -> Result<(), WriteError> {
    let blocks = rules.iter().filter(|rule| !rule.properties.is_empty());
    for (i, rule) in blocks.enumerate() {
        if i > 0 {
            out.whitespace(STYLE_NEWLINE)?;
            out.whitespace(STYLE_NEWLINE)?;
        }
        out.raw_text(&format!("{} {{", rule.selector))?;
        out.whitespace(STYLE_NEWLINE)?;
        for (name, value) in &rule.properties {
            out.raw_text(&format!("  {name}: {value};"))?;
            out.whitespace(STYLE_NEWLINE)?;
        }
        out.raw_text("}")?;
    }
    Ok(())
}
