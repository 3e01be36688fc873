//! Image and embedded object resolution.

use rtf_html_config::ImageSettings;

use crate::visual::VisualImage;
use crate::writer::{MarkupSink, WriteError};

const TWIPS_PER_INCH: u128 = 1440;

/// Resolves picture locations and sizes, and renders embedded objects.
pub trait ObjectProvider {
    /// URI written into the image `src` attribute.
    fn uri(&self, image: &VisualImage) -> String;

    /// Display width in pixels.
    fn width(&self, image: &VisualImage) -> u32;

    /// Display height in pixels.
    fn height(&self, image: &VisualImage) -> u32;

    /// Render the embedded object attached at position `index` (zero-based,
    /// in document order) at the current output position.
    ///
    /// The default renders nothing.
    fn render_object(&self, index: usize, out: &mut dyn MarkupSink) -> Result<(), WriteError> {
        let _ = (index, out);
        Ok(())
    }
}

/// Default provider: pictures are expected as numbered files next to the
/// output, sized from their twip dimensions at the configured DPI.
#[derive(Debug, Clone)]
pub struct ImageFileProvider {
    settings: ImageSettings,
}

impl ImageFileProvider {
    #[must_use]
    pub fn new(settings: ImageSettings) -> Self {
        Self { settings }
    }

    fn to_pixels(&self, twips: u32, scale_percent: u32) -> u32 {
        let scaled = u128::from(twips) * u128::from(scale_percent) * u128::from(self.settings.dpi);
        let divisor = 100 * TWIPS_PER_INCH;
        let pixels = (scaled + divisor / 2) / divisor;
        u32::try_from(pixels).unwrap_or(u32::MAX)
    }
}

impl Default for ImageFileProvider {
    fn default() -> Self {
        Self::new(ImageSettings::default())
    }
}

impl ObjectProvider for ImageFileProvider {
    fn uri(&self, image: &VisualImage) -> String {
        let file_name = self
            .settings
            .file_name_pattern
            .replace("{index}", &image.index.to_string())
            .replace("{ext}", image.format.extension());
        match &self.settings.base_path {
            Some(base) => format!("{base}{file_name}"),
            None => file_name,
        }
    }

    fn width(&self, image: &VisualImage) -> u32 {
        self.to_pixels(image.width_twips, image.scale_x)
    }

    fn height(&self, image: &VisualImage) -> u32 {
        self.to_pixels(image.height_twips, image.scale_y)
    }
}
