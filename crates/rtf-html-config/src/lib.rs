//! Rendering configuration for the RTF to HTML converter.
//!
//! [`HtmlSettings`] controls which parts of the document scaffolding are
//! emitted, what goes into `<head>`, and how text runs are post-processed
//! (hidden text, visual hyperlinks, image naming).
//!
//! Settings are usually built in code with the `with_*` helpers, but can also
//! be parsed from a `rtf-html.toml` file:
//!
//! ```toml
//! title = "Quarterly report"
//! stylesheet_links = ["report.css"]
//! convert_visual_hyperlinks = true
//!
//! [scope]
//! document = false
//!
//! [[styles]]
//! selector = "body"
//! properties = { margin = "0", font-family = "Georgia" }
//!
//! [images]
//! base_path = "media/"
//! dpi = 120
//! ```
//!
//! Every field has a default, so an empty file yields [`HtmlSettings::default`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rtf-html.toml";

/// Pattern used to recognize URLs written as plain text.
pub const DEFAULT_VISUAL_HYPERLINK_PATTERN: &str =
    r"\w+://[\w\-]+(\.[\w\-]+)*([\w\-.,@?^=%&:/~+#]*[\w\-@?^=%&/~+#])?";

/// Character set announced in the content-type meta tag.
pub const DEFAULT_CHARACTER_SET: &str = "UTF-8";

/// Rendering settings for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmlSettings {
    /// Which scaffolding stages are emitted.
    pub scope: ConvertScope,
    /// Character set for the content-type meta tag (`None` omits the charset).
    pub character_set: Option<String>,
    /// Document title written into `<title>`.
    pub title: Option<String>,
    /// Stylesheets linked from `<head>`, in order. Empty entries are skipped.
    pub stylesheet_links: Vec<String>,
    /// CSS rules written into an inline `<style>` block, in order.
    pub styles: Vec<CssRule>,
    /// Whether hidden text runs are rendered.
    pub show_hidden_text: bool,
    /// Whether text runs that look like URLs become anchors.
    pub convert_visual_hyperlinks: bool,
    /// Regex a text run must match in full to be treated as a hyperlink.
    pub visual_hyperlink_pattern: String,
    /// Image naming and sizing used by the default object provider.
    pub images: ImageSettings,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            scope: ConvertScope::all(),
            character_set: Some(DEFAULT_CHARACTER_SET.to_owned()),
            title: None,
            stylesheet_links: Vec::new(),
            styles: Vec::new(),
            show_hidden_text: false,
            convert_visual_hyperlinks: false,
            visual_hyperlink_pattern: DEFAULT_VISUAL_HYPERLINK_PATTERN.to_owned(),
            images: ImageSettings::default(),
        }
    }
}

/// Independently gated parts of the output scaffolding.
///
/// `content` gates the visual content itself, separately from the `<body>`
/// wrapper around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConvertScope {
    /// `<!DOCTYPE html>` prolog.
    pub document: bool,
    /// `<html>` wrapper.
    pub html: bool,
    /// `<head>` with meta, links, title and styles.
    pub head: bool,
    /// `<body>` wrapper.
    pub body: bool,
    /// The converted visual content.
    pub content: bool,
}

impl ConvertScope {
    /// Every stage enabled: a complete standalone document.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            document: true,
            html: true,
            head: true,
            body: true,
            content: true,
        }
    }

    /// Only the converted content, for embedding into another document.
    #[must_use]
    pub const fn content() -> Self {
        Self {
            content: true,
            ..Self::none()
        }
    }

    /// Nothing at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            document: false,
            html: false,
            head: false,
            body: false,
            content: false,
        }
    }
}

impl Default for ConvertScope {
    fn default() -> Self {
        Self::all()
    }
}

/// A named CSS rule block written into the inline `<style>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CssRule {
    /// Selector, e.g. `body` or `p.note`.
    pub selector: String,
    /// Declarations in the order they are written.
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

impl CssRule {
    /// Create an empty rule for `selector`.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: IndexMap::new(),
        }
    }

    /// Append a declaration. Re-setting a property keeps its original position.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// Image naming and sizing for the default object provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// File name template; `{index}` and `{ext}` are substituted.
    pub file_name_pattern: String,
    /// Prefix prepended to every generated file name.
    pub base_path: Option<String>,
    /// Resolution used to convert twips into pixels.
    pub dpi: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            file_name_pattern: "image{index}.{ext}".to_owned(),
            base_path: None,
            dpi: 96,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl HtmlSettings {
    /// Load settings from an explicit file, or discover `rtf-html.toml` in the
    /// current directory and its parents.
    ///
    /// Falls back to defaults when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing or
    /// validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Validate settings values.
    ///
    /// Called automatically when loading from TOML. Settings built in code
    /// are validated by the converter before use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_styles()?;
        self.validate_hyperlinks()?;
        self.validate_images()?;
        Ok(())
    }

    fn validate_styles(&self) -> Result<(), ConfigError> {
        for rule in &self.styles {
            require_non_empty(&rule.selector, "styles.selector")?;
            for name in rule.properties.keys() {
                require_non_empty(name, &format!("styles[{}].properties", rule.selector))?;
            }
        }
        Ok(())
    }

    fn validate_hyperlinks(&self) -> Result<(), ConfigError> {
        if self.convert_visual_hyperlinks {
            require_non_empty(&self.visual_hyperlink_pattern, "visual_hyperlink_pattern")?;
        }
        Ok(())
    }

    fn validate_images(&self) -> Result<(), ConfigError> {
        if self.images.dpi == 0 {
            return Err(ConfigError::Validation(
                "images.dpi must be greater than 0".to_owned(),
            ));
        }
        if !self.images.file_name_pattern.contains("{index}") {
            return Err(ConfigError::Validation(
                "images.file_name_pattern must contain {index}".to_owned(),
            ));
        }
        Ok(())
    }

    /// Whether at least one CSS rule has declarations.
    #[must_use]
    pub fn has_styles(&self) -> bool {
        self.styles.iter().any(|rule| !rule.properties.is_empty())
    }

    /// Set the scaffolding scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ConvertScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set or clear the character set.
    #[must_use]
    pub fn with_character_set(mut self, charset: Option<String>) -> Self {
        self.character_set = charset;
        self
    }

    /// Append a stylesheet link.
    #[must_use]
    pub fn with_stylesheet_link(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_links.push(href.into());
        self
    }

    /// Append an inline CSS rule.
    #[must_use]
    pub fn with_style(mut self, rule: CssRule) -> Self {
        self.styles.push(rule);
        self
    }

    /// Render hidden text runs instead of dropping them.
    #[must_use]
    pub fn with_hidden_text(mut self, show: bool) -> Self {
        self.show_hidden_text = show;
        self
    }

    /// Enable visual hyperlink detection with the default pattern.
    #[must_use]
    pub fn with_visual_hyperlinks(mut self, enabled: bool) -> Self {
        self.convert_visual_hyperlinks = enabled;
        self
    }

    /// Replace the visual hyperlink pattern.
    #[must_use]
    pub fn with_visual_hyperlink_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.visual_hyperlink_pattern = pattern.into();
        self
    }

    /// Replace the image settings.
    #[must_use]
    pub fn with_images(mut self, images: ImageSettings) -> Self {
        self.images = images;
        self
    }
}
