//! Visual content model consumed by the converter.
//!
//! A parsed RTF document is flattened into a linear sequence of [`Visual`]
//! elements. Structure such as paragraphs and lists is not explicit in this
//! sequence; the converter infers it from neighbouring elements.

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Left aligned (the default; emits no style).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
    /// Justified.
    Justify,
}

/// Underline variants. Any variant other than `None` renders as underline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Underline {
    #[default]
    None,
    Continuous,
    Dotted,
    Dashed,
    Double,
    Wave,
    Words,
}

/// Strikethrough variants. Any variant other than `None` renders as strike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strikethrough {
    #[default]
    None,
    Single,
    Double,
}

/// RGB color from the document color table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` notation.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Character formatting of a text run.
///
/// Subscript wins over superscript when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Style {
    pub alignment: TextAlignment,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikethrough: Strikethrough,
    pub hidden: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_family: Option<String>,
    /// Font size in half-points, as in RTF `\fs`.
    pub font_size: Option<u32>,
}

impl Style {
    #[must_use]
    pub fn is_underline(&self) -> bool {
        self.underline != Underline::None
    }

    #[must_use]
    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough != Strikethrough::None
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    #[must_use]
    pub fn with_strikethrough(mut self, strikethrough: Strikethrough) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    #[must_use]
    pub fn with_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_subscript(mut self) -> Self {
        self.subscript = true;
        self
    }

    #[must_use]
    pub fn with_superscript(mut self) -> Self {
        self.superscript = true;
        self
    }

    #[must_use]
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, half_points: u32) -> Self {
        self.font_family = Some(family.into());
        self.font_size = Some(half_points);
        self
    }
}

/// Kind of structural break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakKind {
    Line,
    Page,
    Paragraph,
    Section,
}

/// Special characters that are emitted as character references, plus the
/// markers that bracket list numbering and embedded objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialCharKind {
    EmDash,
    EmSpace,
    EnDash,
    EnSpace,
    LeftDoubleQuote,
    LeftSingleQuote,
    RightDoubleQuote,
    RightSingleQuote,
    NonBreakingHyphen,
    NonBreakingSpace,
    ParagraphNumberBegin,
    ParagraphNumberEnd,
    ObjectAttachPoint,
}

/// Encoding of embedded picture data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Emf,
    Wmf,
    Bmp,
}

impl ImageFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Emf => "emf",
            Self::Wmf => "wmf",
            Self::Bmp => "bmp",
        }
    }
}

/// A text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualText {
    pub text: String,
    pub format: Style,
}

/// A picture reference. The pixels themselves stay with the object provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualImage {
    pub alignment: TextAlignment,
    /// Zero-based position of the picture in the document.
    pub index: usize,
    pub format: ImageFormat,
    /// Desired size in twips (1/1440 inch).
    pub width_twips: u32,
    pub height_twips: u32,
    /// Scaling in percent.
    pub scale_x: u32,
    pub scale_y: u32,
}

impl VisualImage {
    /// Unscaled picture of the given size.
    #[must_use]
    pub fn new(index: usize, format: ImageFormat, width_twips: u32, height_twips: u32) -> Self {
        Self {
            alignment: TextAlignment::Left,
            index,
            format,
            width_twips,
            height_twips,
            scale_x: 100,
            scale_y: 100,
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale_x: u32, scale_y: u32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }
}

/// A special character or marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualSpecial {
    pub kind: SpecialCharKind,
    pub format: Style,
}

/// One unit of the visual content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visual {
    Text(VisualText),
    Image(VisualImage),
    Break(BreakKind),
    Special(VisualSpecial),
}

impl Visual {
    /// Text run with the given formatting.
    #[must_use]
    pub fn text(text: impl Into<String>, format: Style) -> Self {
        Self::Text(VisualText {
            text: text.into(),
            format,
        })
    }

    /// Text run with default formatting.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::text(text, Style::default())
    }

    /// Special character with default formatting.
    #[must_use]
    pub fn special(kind: SpecialCharKind) -> Self {
        Self::Special(VisualSpecial {
            kind,
            format: Style::default(),
        })
    }

    #[must_use]
    pub fn is_paragraph_break(&self) -> bool {
        matches!(self, Self::Break(BreakKind::Paragraph))
    }

    #[must_use]
    pub fn is_special(&self, kind: SpecialCharKind) -> bool {
        matches!(self, Self::Special(special) if special.kind == kind)
    }
}

/// The visual content of a parsed document, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub visuals: Vec<Visual>,
}

impl Document {
    #[must_use]
    pub fn new(visuals: Vec<Visual>) -> Self {
        Self { visuals }
    }
}

impl FromIterator<Visual> for Document {
    fn from_iter<I: IntoIterator<Item = Visual>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
