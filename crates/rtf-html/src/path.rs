//! Stack of currently open output elements.

use crate::backend::Tag;

/// Open elements, outermost first.
#[derive(Debug, Default, Clone)]
pub(crate) struct ElementPath {
    elements: Vec<Tag>,
}

impl ElementPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.elements.push(tag);
    }

    /// Remove the innermost element.
    pub fn pop(&mut self) -> Option<Tag> {
        self.elements.pop()
    }

    /// Whether `tag` is open anywhere in the path.
    #[must_use]
    pub fn contains(&self, tag: Tag) -> bool {
        self.elements.contains(&tag)
    }

    /// Whether `tag` is the innermost open element.
    #[must_use]
    pub fn is_current(&self, tag: Tag) -> bool {
        self.elements.last() == Some(&tag)
    }

    #[must_use]
    pub fn current(&self) -> Option<Tag> {
        self.elements.last().copied()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
