//! Tag emission backends.
//!
//! The converter decides *which* structural element to open; a
//! [`TagBackend`] decides how that element is spelled in the output dialect.
//! Backends are zero-sized types selected at compile time:
//!
//! - [`HtmlBackend`]: classic presentational HTML (`<b>`, `<i>`, `<s>`)
//! - [`SemanticHtmlBackend`]: semantic HTML5 (`<strong>`, `<em>`, `<del>`)

use crate::visual::{SpecialCharKind, TextAlignment};

/// Structural element kinds the converter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Title,
    Meta,
    Link,
    Style,
    Body,
    Paragraph,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Span,
    Anchor,
    Subscript,
    Superscript,
    UnorderedList,
    OrderedList,
    ListItem,
    Image,
    LineBreak,
}

/// Markup dialect used by the converter.
pub trait TagBackend {
    /// Name written in the document type declaration.
    const DOC_TYPE: &'static str = "html";

    /// Element name for a structural tag.
    fn element_name(tag: Tag) -> &'static str;

    /// Elements that never have content and are written self-closed.
    fn is_void(tag: Tag) -> bool {
        matches!(tag, Tag::Meta | Tag::Link | Tag::Image | Tag::LineBreak)
    }

    /// Inline `style` value for paragraph alignment. Left alignment is the
    /// default and emits nothing.
    fn alignment_style(alignment: TextAlignment) -> Option<&'static str> {
        match alignment {
            TextAlignment::Left => None,
            TextAlignment::Center => Some("text-align:center"),
            TextAlignment::Right => Some("text-align:right"),
            TextAlignment::Justify => Some("text-align:justify"),
        }
    }

    /// Character reference (without `&` and `;`) for a special character.
    ///
    /// Markers and object attach points have no textual form.
    fn character_reference(kind: SpecialCharKind) -> Option<&'static str> {
        match kind {
            SpecialCharKind::EmDash => Some("mdash"),
            SpecialCharKind::EmSpace => Some("emsp"),
            SpecialCharKind::EnDash => Some("ndash"),
            SpecialCharKind::EnSpace => Some("ensp"),
            SpecialCharKind::LeftDoubleQuote => Some("ldquo"),
            SpecialCharKind::LeftSingleQuote => Some("lsquo"),
            SpecialCharKind::RightDoubleQuote => Some("rdquo"),
            SpecialCharKind::RightSingleQuote => Some("rsquo"),
            SpecialCharKind::NonBreakingHyphen => Some("#8209"),
            SpecialCharKind::NonBreakingSpace => Some("nbsp"),
            SpecialCharKind::ParagraphNumberBegin
            | SpecialCharKind::ParagraphNumberEnd
            | SpecialCharKind::ObjectAttachPoint => None,
        }
    }
}

/// Classic HTML backend.
pub struct HtmlBackend;

impl TagBackend for HtmlBackend {
    fn element_name(tag: Tag) -> &'static str {
        match tag {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Title => "title",
            Tag::Meta => "meta",
            Tag::Link => "link",
            Tag::Style => "style",
            Tag::Body => "body",
            Tag::Paragraph => "p",
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Underline => "u",
            Tag::Strikethrough => "s",
            Tag::Span => "span",
            Tag::Anchor => "a",
            Tag::Subscript => "sub",
            Tag::Superscript => "sup",
            Tag::UnorderedList => "ul",
            Tag::OrderedList => "ol",
            Tag::ListItem => "li",
            Tag::Image => "img",
            Tag::LineBreak => "br",
        }
    }
}

/// Semantic HTML5 backend.
///
/// Uses `<strong>`, `<em>` and `<del>` for bold, italic and strikethrough;
/// everything else matches [`HtmlBackend`].
pub struct SemanticHtmlBackend;

impl TagBackend for SemanticHtmlBackend {
    fn element_name(tag: Tag) -> &'static str {
        match tag {
            Tag::Bold => "strong",
            Tag::Italic => "em",
            Tag::Strikethrough => "del",
            _ => HtmlBackend::element_name(tag),
        }
    }
}
