//! Conversion of RTF visual content into HTML.
//!
//! An RTF document, once interpreted, is a flat sequence of [`Visual`]s:
//! formatted text runs, images, breaks and special characters. This crate
//! walks that sequence once and emits balanced markup, reconstructing the
//! paragraphs, lists, inline formatting and hyperlinks that RTF only
//! implies.
//!
//! # Architecture
//!
//! - [`HtmlConverter`] drives the conversion and owns the collaborators.
//! - [`TagBackend`] decides element names: [`HtmlBackend`] (`<b>`, `<i>`,
//!   `<s>`) or [`SemanticHtmlBackend`] (`<strong>`, `<em>`, `<del>`).
//! - [`StyleResolver`] maps a text run to CSS declarations.
//! - [`ObjectProvider`] resolves image locations and sizes and renders
//!   embedded objects.
//! - [`MarkupSink`] receives the output; [`MarkupWriter`] writes it as text.
//!
//! # Example
//!
//! ```
//! use rtf_html::{ConvertScope, Document, HtmlBackend, HtmlConverter, HtmlSettings, Style, Visual};
//!
//! let document = Document::new(vec![
//!     Visual::plain("Hello, "),
//!     Visual::text("World", Style::default().with_bold()),
//! ]);
//! let settings = HtmlSettings::default().with_scope(ConvertScope::content());
//! let result = HtmlConverter::<HtmlBackend>::new(settings)?.convert(&document)?;
//! assert_eq!(result.html, "<p>Hello, <b>World</b></p>");
//! # Ok::<(), rtf_html::ConvertError>(())
//! ```

mod backend;
mod converter;
mod error;
mod list;
mod object;
mod path;
mod scaffold;
mod style;
mod visual;
mod writer;

pub use backend::{HtmlBackend, SemanticHtmlBackend, Tag, TagBackend};
pub use converter::{ConvertResult, HtmlConverter};
pub use error::ConvertError;
pub use object::{ImageFileProvider, ObjectProvider};
pub use rtf_html_config::{ConvertScope, CssRule, HtmlSettings, ImageSettings};
pub use style::{FormatStyleResolver, ResolvedStyle, StyleResolver};
pub use visual::{
    BreakKind, Color, Document, ImageFormat, SpecialCharKind, Strikethrough, Style, TextAlignment,
    Underline, Visual, VisualImage, VisualSpecial, VisualText,
};
pub use writer::{MarkupSink, MarkupWriter, WriteError, escape_markup};

/// Convert `document` with [`HtmlBackend`] and the default collaborators.
///
/// Structural warnings are logged and otherwise dropped; use
/// [`HtmlConverter::convert`] to inspect them.
pub fn to_html(document: &Document, settings: &HtmlSettings) -> Result<String, ConvertError> {
    let result = HtmlConverter::<HtmlBackend>::new(settings.clone())?.convert(document)?;
    Ok(result.html)
}
