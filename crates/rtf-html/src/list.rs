//! List reconstruction from paragraph numbering.
//!
//! RTF has no list container. A numbered or bulleted paragraph is a flat run
//! of `ParagraphNumberBegin`, the bullet or number text, `ParagraphNumberEnd`,
//! the item text and a paragraph break. [`ListTracker`] watches that run and
//! tells the converter when a list item starts and when the list is over.

use crate::backend::Tag;
use crate::visual::{SpecialCharKind, Visual};

/// Bullet glyphs that make a list unordered. Anything else is a number.
const BULLETS: [&str; 2] = ["\u{b7}", "\u{2022}"];

/// Kind of list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    /// Classify the numbering text of a list item.
    #[must_use]
    pub fn for_marker(text: &str) -> Self {
        if BULLETS.contains(&text) {
            Self::Unordered
        } else {
            Self::Ordered
        }
    }

    #[must_use]
    pub fn tag(self) -> Tag {
        match self {
            Self::Unordered => Tag::UnorderedList,
            Self::Ordered => Tag::OrderedList,
        }
    }
}

/// Numbering state carried across visuals during one conversion.
#[derive(Debug, Default)]
pub(crate) struct ListTracker<'d> {
    in_paragraph_number: bool,
    last_visual: Option<&'d Visual>,
}

impl<'d> ListTracker<'d> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// If `visual` is the numbering text of a list item, the list it starts.
    ///
    /// Such a visual is absorbed by the list item and must not be rendered.
    #[must_use]
    pub fn list_item_start(&self, visual: &Visual) -> Option<ListKind> {
        match visual {
            Visual::Text(text) if self.in_paragraph_number => Some(ListKind::for_marker(&text.text)),
            _ => None,
        }
    }

    /// Whether an open list ends before `next`.
    ///
    /// Only a paragraph break directly followed by something other than a
    /// new paragraph number ends the list, so closing lags one visual behind
    /// the break.
    #[must_use]
    pub fn closes_list_before(&self, next: &Visual) -> bool {
        self.last_visual.is_some_and(Visual::is_paragraph_break)
            && !next.is_special(SpecialCharKind::ParagraphNumberBegin)
    }

    pub fn set_in_paragraph_number(&mut self, value: bool) {
        self.in_paragraph_number = value;
    }

    /// Record `visual` as the last one handled.
    pub fn leave(&mut self, visual: &'d Visual) {
        self.last_visual = Some(visual);
    }
}
