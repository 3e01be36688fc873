//! Structured markup writer.
//!
//! [`MarkupSink`] is the interface the converter and object providers write
//! through. [`MarkupWriter`] implements it over any [`std::fmt::Write`]; like
//! an XML writer, a start tag stays open for attributes until the first piece
//! of content, child element or end tag is written.

use std::fmt::Write;

/// Error writing markup.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The underlying sink failed.
    #[error("failed to write to output")]
    Fmt(#[from] std::fmt::Error),

    /// An attribute was written after the start tag was closed.
    #[error("attribute `{0}` written outside of a start tag")]
    AttributeOutsideStartTag(String),

    /// An end tag was requested with no element open.
    #[error("end element requested with no open element")]
    UnbalancedEnd,
}

/// Destination for structured markup.
///
/// Implement this to receive the converter output as a tree instead of text,
/// e.g. to embed it into a larger document being built elsewhere.
pub trait MarkupSink {
    /// Write a document type declaration.
    fn doc_type(&mut self, name: &str) -> Result<(), WriteError>;

    /// Begin an element. Attributes may follow until content is written.
    fn start_element(&mut self, name: &str) -> Result<(), WriteError>;

    /// Add an attribute to the element whose start tag is still open.
    fn attribute(&mut self, name: &str, value: &str) -> Result<(), WriteError>;

    /// Write character data. The sink is responsible for escaping.
    fn text(&mut self, text: &str) -> Result<(), WriteError>;

    /// Write the content of a raw text element such as `<style>`.
    ///
    /// No entity escaping; only `</` is neutralized so the element cannot be
    /// closed early.
    fn raw_text(&mut self, text: &str) -> Result<(), WriteError>;

    /// Write a character reference such as `nbsp` or `#8209`.
    fn entity_ref(&mut self, name: &str) -> Result<(), WriteError>;

    /// Write whitespace verbatim.
    fn whitespace(&mut self, ws: &str) -> Result<(), WriteError>;

    /// End the innermost element, self-closing it if it is empty.
    fn end_element(&mut self) -> Result<(), WriteError>;

    /// End the innermost element, always with an explicit end tag.
    fn full_end_element(&mut self) -> Result<(), WriteError>;
}

/// Streaming writer producing well-formed markup.
pub struct MarkupWriter<W: Write> {
    out: W,
    open: Vec<String>,
    in_start_tag: bool,
}

impl MarkupWriter<String> {
    /// Writer collecting into a new string.
    #[must_use]
    pub fn new() -> Self {
        Self::from_sink(String::with_capacity(4096))
    }
}

impl Default for MarkupWriter<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> MarkupWriter<W> {
    /// Writer appending to `out`.
    pub fn from_sink(out: W) -> Self {
        Self {
            out,
            open: Vec::new(),
            in_start_tag: false,
        }
    }

    /// Number of elements started but not yet ended.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Return the sink. Elements still open are left unterminated.
    pub fn finish(mut self) -> Result<W, WriteError> {
        self.close_start_tag()?;
        Ok(self.out)
    }

    /// Write pre-rendered markup verbatim.
    pub fn raw(&mut self, markup: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        self.out.write_str(markup)?;
        Ok(())
    }

    fn close_start_tag(&mut self) -> Result<(), WriteError> {
        if self.in_start_tag {
            self.in_start_tag = false;
            self.out.write_char('>')?;
        }
        Ok(())
    }
}

impl<W: Write> MarkupSink for MarkupWriter<W> {
    /// Write `<!DOCTYPE name>`.
    fn doc_type(&mut self, name: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        write!(self.out, "<!DOCTYPE {name}>")?;
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        write!(self.out, "<{name}")?;
        self.open.push(name.to_owned());
        self.in_start_tag = true;
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        if !self.in_start_tag {
            return Err(WriteError::AttributeOutsideStartTag(name.to_owned()));
        }
        write!(self.out, r#" {name}="{}""#, escape_markup(value))?;
        Ok(())
    }

    /// Write escaped character data.
    fn text(&mut self, text: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        self.out.write_str(&escape_markup(text))?;
        Ok(())
    }

    fn raw_text(&mut self, text: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        self.out.write_str(&text.replace("</", "<\\/"))?;
        Ok(())
    }

    /// Write a character reference such as `&nbsp;` or `&#8209;`.
    fn entity_ref(&mut self, name: &str) -> Result<(), WriteError> {
        self.close_start_tag()?;
        write!(self.out, "&{name};")?;
        Ok(())
    }

    fn whitespace(&mut self, ws: &str) -> Result<(), WriteError> {
        debug_assert!(ws.chars().all(char::is_whitespace));
        self.raw(ws)
    }

    /// End the innermost element, self-closing it (`<br />`) if it is empty.
    fn end_element(&mut self) -> Result<(), WriteError> {
        let name = self.open.pop().ok_or(WriteError::UnbalancedEnd)?;
        if self.in_start_tag {
            self.in_start_tag = false;
            self.out.write_str(" />")?;
        } else {
            write!(self.out, "</{name}>")?;
        }
        Ok(())
    }

    fn full_end_element(&mut self) -> Result<(), WriteError> {
        self.close_start_tag()?;
        let name = self.open.pop().ok_or(WriteError::UnbalancedEnd)?;
        write!(self.out, "</{name}>")?;
        Ok(())
    }
}

/// Escape the five reserved markup characters.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}
