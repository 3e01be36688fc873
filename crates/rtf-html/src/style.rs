//! Mapping of text run formatting to presentational CSS.

use crate::visual::{Color, VisualText};

/// Presentational attributes for a text run. Each is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
}

impl ResolvedStyle {
    /// True when no declaration would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations().next().is_none()
    }

    /// Present declarations in fixed order: color, background, family, size.
    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("color", &self.foreground_color),
            ("background-color", &self.background_color),
            ("font-family", &self.font_family),
            ("font-size", &self.font_size),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((name, v)),
            _ => None,
        })
    }

    /// Serialized `style` attribute value, declarations joined by `;`.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.declarations()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Resolves the presentational style of a text run.
pub trait StyleResolver {
    fn resolve(&self, text: &VisualText) -> ResolvedStyle;
}

/// Default resolver reading colors and font straight from the run format.
///
/// Black text and white background are the document defaults and are not
/// emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatStyleResolver;

impl StyleResolver for FormatStyleResolver {
    fn resolve(&self, text: &VisualText) -> ResolvedStyle {
        let format = &text.format;
        ResolvedStyle {
            foreground_color: format
                .foreground
                .filter(|c| *c != Color::BLACK)
                .map(Color::to_hex),
            background_color: format
                .background
                .filter(|c| *c != Color::WHITE)
                .map(Color::to_hex),
            font_family: format.font_family.as_deref().and_then(css_font_family),
            font_size: format.font_size.and_then(css_font_size),
        }
    }
}

/// Font family names containing whitespace must be quoted in CSS.
fn css_font_family(family: &str) -> Option<String> {
    let family = family.trim();
    if family.is_empty() {
        None
    } else if family.contains(char::is_whitespace) {
        Some(format!("\"{family}\""))
    } else {
        Some(family.to_owned())
    }
}

/// Half-points to points.
fn css_font_size(half_points: u32) -> Option<String> {
    match half_points {
        0 => None,
        n if n % 2 == 0 => Some(format!("{}pt", n / 2)),
        n => Some(format!("{}.5pt", n / 2)),
    }
}
