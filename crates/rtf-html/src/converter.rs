//! Visual content to HTML conversion.

use std::marker::PhantomData;

use regex::Regex;
use rtf_html_config::HtmlSettings;

use crate::backend::{Tag, TagBackend};
use crate::error::ConvertError;
use crate::list::{ListKind, ListTracker};
use crate::object::{ImageFileProvider, ObjectProvider};
use crate::path::ElementPath;
use crate::style::{FormatStyleResolver, StyleResolver};
use crate::visual::{
    BreakKind, Document, SpecialCharKind, TextAlignment, Visual, VisualImage, VisualSpecial,
    VisualText,
};
use crate::writer::{MarkupSink, MarkupWriter, WriteError};

/// Result of converting a document.
#[derive(Clone, Debug)]
pub struct ConvertResult {
    /// Rendered markup.
    pub html: String,
    /// Diagnostics about the produced structure (e.g., unbalanced elements).
    pub warnings: Vec<String>,
}

/// Converts the visual content of a document into HTML.
///
/// The converter itself is immutable; all per-document state lives in a
/// traversal state created by each call to [`convert`](Self::convert), so
/// one converter can be reused for any number of documents.
///
/// Paragraphs, lists and inline formatting are not explicit in the visual
/// sequence. They are reconstructed from neighbouring visuals while walking
/// it once, in order.
pub struct HtmlConverter<B: TagBackend> {
    settings: HtmlSettings,
    style_resolver: Box<dyn StyleResolver>,
    object_provider: Box<dyn ObjectProvider>,
    hyperlink_pattern: Option<Regex>,
    _backend: PhantomData<B>,
}

impl<B: TagBackend> HtmlConverter<B> {
    /// Create a converter for `settings`.
    ///
    /// Uses [`FormatStyleResolver`] and an [`ImageFileProvider`] built from
    /// `settings.images` until replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::InvalidSettings` if the settings fail validation
    /// and `ConvertError::HyperlinkPattern` if hyperlink conversion is enabled
    /// with a pattern that does not compile.
    pub fn new(settings: HtmlSettings) -> Result<Self, ConvertError> {
        settings.validate()?;
        let hyperlink_pattern = if settings.convert_visual_hyperlinks {
            // The whole run has to be the link, not just contain one
            Some(Regex::new(&format!(
                "^(?:{})$",
                settings.visual_hyperlink_pattern
            ))?)
        } else {
            None
        };
        let object_provider = Box::new(ImageFileProvider::new(settings.images.clone()));

        Ok(Self {
            settings,
            style_resolver: Box::new(FormatStyleResolver),
            object_provider,
            hyperlink_pattern,
            _backend: PhantomData,
        })
    }

    /// Replace the style resolver.
    #[must_use]
    pub fn with_style_resolver<R: StyleResolver + 'static>(mut self, resolver: R) -> Self {
        self.style_resolver = Box::new(resolver);
        self
    }

    /// Replace the object provider.
    #[must_use]
    pub fn with_object_provider<P: ObjectProvider + 'static>(mut self, provider: P) -> Self {
        self.object_provider = Box::new(provider);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &HtmlSettings {
        &self.settings
    }

    /// Convert `document` into a markup string.
    pub fn convert(&self, document: &Document) -> Result<ConvertResult, ConvertError> {
        let mut writer = MarkupWriter::new();
        let warnings = self.convert_into(document, &mut writer)?;
        Ok(ConvertResult {
            html: writer.finish()?,
            warnings,
        })
    }

    /// Convert `document`, streaming into a caller-supplied sink.
    ///
    /// Returns the structural warnings; the markup goes to `out`.
    pub fn convert_into(
        &self,
        document: &Document,
        out: &mut dyn MarkupSink,
    ) -> Result<Vec<String>, ConvertError> {
        let mut state = TraversalState::new();
        self.render_document(document, &mut state, out)?;
        Ok(structure_warnings(&state.path))
    }

    /// Walk the visual content once, then close whatever structure is left.
    pub(crate) fn render_content<'d>(
        &self,
        document: &'d Document,
        state: &mut TraversalState<'d>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        tracing::debug!(visual_count = document.visuals.len(), "Converting visual content");

        for visual in &document.visuals {
            self.visit(visual, state, out)?;
        }

        if state.is_in_list() {
            tracing::trace!("Closing list at end of content");
            self.end_list(state, out)?;
        }
        self.end_paragraph(state, out)
    }

    fn visit<'d>(
        &self,
        visual: &'d Visual,
        state: &mut TraversalState<'d>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        if !self.enter(visual, state, out)? {
            return Ok(());
        }

        match visual {
            Visual::Text(text) => self.visit_text(text, state, out)?,
            Visual::Image(image) => self.visit_image(image, state, out)?,
            Visual::Break(kind) => self.visit_break(*kind, state, out)?,
            Visual::Special(special) => self.visit_special(special, state, out)?,
        }

        state.list.leave(visual);
        Ok(())
    }

    /// Apply list transitions for `visual`. Returns `false` if the visual was
    /// absorbed as the numbering of a new list item.
    fn enter(
        &self,
        visual: &Visual,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<bool, WriteError> {
        if let Some(kind) = state.list.list_item_start(visual) {
            self.begin_list_item(kind, state, out)?;
            return Ok(false);
        }

        if state.is_in_list() && state.list.closes_list_before(visual) {
            self.end_list(state, out)?;
        }
        Ok(true)
    }

    fn visit_text(
        &self,
        text: &VisualText,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        let format = &text.format;
        if format.hidden && !self.settings.show_hidden_text {
            return Ok(());
        }

        if !state.is_in_list_item() {
            self.begin_paragraph(format.alignment, state, out)?;
        }

        let mut opened = 0;
        for (enabled, tag) in [
            (format.bold, Tag::Bold),
            (format.italic, Tag::Italic),
            (format.is_underline(), Tag::Underline),
            (format.is_strikethrough(), Tag::Strikethrough),
        ] {
            if enabled {
                state.begin::<B>(tag, out)?;
                opened += 1;
            }
        }

        let style = self.style_resolver.resolve(text);
        if !style.is_empty() {
            state.begin::<B>(Tag::Span, out)?;
            out.attribute("style", &style.to_css())?;
            opened += 1;
        }

        if let Some(href) = self.visual_hyperlink(&text.text) {
            state.begin::<B>(Tag::Anchor, out)?;
            out.attribute("href", href)?;
            opened += 1;
        }

        if format.subscript {
            state.begin::<B>(Tag::Subscript, out)?;
            opened += 1;
        } else if format.superscript {
            state.begin::<B>(Tag::Superscript, out)?;
            opened += 1;
        }

        out.text(&text.text)?;

        for _ in 0..opened {
            state.end::<B>(out)?;
        }
        Ok(())
    }

    fn visit_image(
        &self,
        image: &VisualImage,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        self.begin_paragraph(image.alignment, state, out)?;

        let provider = &self.object_provider;
        state.begin::<B>(Tag::Image, out)?;
        out.attribute("width", &provider.width(image).to_string())?;
        out.attribute("height", &provider.height(image).to_string())?;
        out.attribute("src", &provider.uri(image))?;
        state.end::<B>(out)
    }

    fn visit_special(
        &self,
        special: &VisualSpecial,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        match special.kind {
            SpecialCharKind::ParagraphNumberBegin => state.list.set_in_paragraph_number(true),
            SpecialCharKind::ParagraphNumberEnd => state.list.set_in_paragraph_number(false),
            SpecialCharKind::ObjectAttachPoint => {
                if !state.is_in_list_item() {
                    self.begin_paragraph(special.format.alignment, state, out)?;
                }
                let index = state.next_attachment_index();
                self.object_provider.render_object(index, out)?;
            }
            kind => {
                if let Some(reference) = B::character_reference(kind) {
                    if !state.is_in_list_item() {
                        self.begin_paragraph(special.format.alignment, state, out)?;
                    }
                    out.entity_ref(reference)?;
                }
            }
        }
        Ok(())
    }

    fn visit_break(
        &self,
        kind: BreakKind,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        match kind {
            BreakKind::Line => {
                state.begin::<B>(Tag::LineBreak, out)?;
                state.end::<B>(out)?;
            }
            // Not representable in flowed HTML
            BreakKind::Page | BreakKind::Section => {}
            BreakKind::Paragraph => {
                if state.is_in_paragraph() {
                    self.end_paragraph(state, out)?;
                } else if state.is_in_list_item() {
                    state.end_through::<B>(Tag::ListItem, out)?;
                } else {
                    // An empty paragraph still takes up a line
                    self.begin_paragraph(TextAlignment::Left, state, out)?;
                    if let Some(nbsp) = B::character_reference(SpecialCharKind::NonBreakingSpace) {
                        out.entity_ref(nbsp)?;
                    }
                    self.end_paragraph(state, out)?;
                }
            }
        }
        Ok(())
    }

    /// Open a paragraph unless one is already open.
    fn begin_paragraph(
        &self,
        alignment: TextAlignment,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<bool, WriteError> {
        if state.is_in_paragraph() {
            return Ok(false);
        }
        state.begin::<B>(Tag::Paragraph, out)?;
        if let Some(style) = B::alignment_style(alignment) {
            out.attribute("style", style)?;
        }
        Ok(true)
    }

    fn end_paragraph(
        &self,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        if state.is_in_paragraph() {
            state.end_through::<B>(Tag::Paragraph, out)?;
        }
        Ok(())
    }

    fn begin_list_item(
        &self,
        kind: ListKind,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        // Lists never nest inside a paragraph, and items never nest in items
        self.end_paragraph(state, out)?;
        if state.is_in_list_item() {
            state.end_through::<B>(Tag::ListItem, out)?;
        }

        if !state.is_in_list() {
            tracing::trace!(?kind, "Opening list");
            state.begin::<B>(kind.tag(), out)?;
        }
        state.begin::<B>(Tag::ListItem, out)
    }

    fn end_list(
        &self,
        state: &mut TraversalState<'_>,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        self.end_paragraph(state, out)?;
        if state.is_in_list_item() {
            state.end_through::<B>(Tag::ListItem, out)?;
        }
        // A paragraph may sit directly in the list after an item was closed
        self.end_paragraph(state, out)?;
        if let Some(list) = [Tag::UnorderedList, Tag::OrderedList]
            .into_iter()
            .find(|tag| state.path.contains(*tag))
        {
            state.end_through::<B>(list, out)?;
        }
        Ok(())
    }

    /// The run text itself, if it should become a link.
    fn visual_hyperlink<'t>(&self, text: &'t str) -> Option<&'t str> {
        let pattern = self.hyperlink_pattern.as_ref()?;
        (!text.is_empty() && pattern.is_match(text)).then_some(text)
    }
}

/// Diagnostics for a path that should be empty after a conversion.
fn structure_warnings(path: &ElementPath) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    tracing::warn!(
        depth = path.depth(),
        innermost = ?path.current(),
        "Unbalanced element structure"
    );
    vec![format!(
        "unbalanced element structure: {} element(s) left open",
        path.depth()
    )]
}

/// Mutable state of a single conversion.
///
/// Created fresh by every conversion call and dropped at its end.
pub(crate) struct TraversalState<'d> {
    pub(crate) path: ElementPath,
    list: ListTracker<'d>,
    attachment_index: usize,
}

impl TraversalState<'_> {
    fn new() -> Self {
        Self {
            path: ElementPath::new(),
            list: ListTracker::new(),
            attachment_index: 0,
        }
    }

    /// Open `tag` in both the output and the element path.
    pub(crate) fn begin<B: TagBackend>(
        &mut self,
        tag: Tag,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        out.start_element(B::element_name(tag))?;
        self.path.push(tag);
        Ok(())
    }

    /// Close the innermost open element.
    pub(crate) fn end<B: TagBackend>(&mut self, out: &mut dyn MarkupSink) -> Result<(), WriteError> {
        match self.path.pop() {
            Some(tag) if B::is_void(tag) => out.end_element(),
            Some(_) => out.full_end_element(),
            None => Err(WriteError::UnbalancedEnd),
        }
    }

    /// Close elements up to and including the innermost `tag`.
    fn end_through<B: TagBackend>(
        &mut self,
        tag: Tag,
        out: &mut dyn MarkupSink,
    ) -> Result<(), WriteError> {
        while !self.path.is_empty() {
            let innermost = self.path.is_current(tag);
            self.end::<B>(out)?;
            if innermost {
                break;
            }
        }
        Ok(())
    }

    fn is_in_paragraph(&self) -> bool {
        self.path.contains(Tag::Paragraph)
    }

    fn is_in_list(&self) -> bool {
        self.path.contains(Tag::UnorderedList) || self.path.contains(Tag::OrderedList)
    }

    fn is_in_list_item(&self) -> bool {
        self.path.contains(Tag::ListItem)
    }

    fn next_attachment_index(&mut self) -> usize {
        let index = self.attachment_index;
        self.attachment_index += 1;
        index
    }
}
