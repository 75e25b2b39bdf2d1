//! PDF renderer built on printpdf.

use crate::wrap_text;
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use storybook_core::{Page, RenderSummary, Storybook};
use storybook_error::{RenderError, StorybookResult};
use storybook_interface::StorybookRenderer;
use tracing::{debug, info, instrument, warn};

const MM_PER_INCH: f32 = 25.4;
/// Points are 1/72 inch.
const MM_PER_PT: f32 = MM_PER_INCH / 72.0;

/// Renders storybooks as PDF documents.
///
/// # Examples
///
/// ```no_run
/// use storybook_interface::StorybookRenderer;
/// use storybook_render::PdfRenderer;
/// # fn example(book: &storybook_core::Storybook) -> Result<(), Box<dyn std::error::Error>> {
/// let renderer = PdfRenderer::default();
/// if let Some(summary) = renderer.render(book, "storybook.pdf".as_ref())? {
///     println!("wrote {} pages", summary.rendered_pages());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct PdfRenderer {
    /// Resolution used to size pages from image pixels
    dpi: f32,
    /// Size of the overlaid page text in points
    font_size: f32,
    /// Distance of the text block from the top-left corner
    margin: Mm,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            font_size: 18.0,
            margin: Mm(12.0),
        }
    }
}

impl PdfRenderer {
    /// Returns a renderer that uses a different text size.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Returns a renderer that sizes pages at a different resolution.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    fn load_image(page: &Page) -> Option<DynamicImage> {
        let path = page.image.as_deref()?;
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(page = page.index, path, error = %e, "Image file unreadable, skipping page");
                return None;
            }
        };
        match image_crate::load_from_memory(&bytes) {
            // Alpha channels are dropped; the overlay is drawn on an opaque page.
            Ok(img) => Some(DynamicImage::ImageRgb8(img.to_rgb8())),
            Err(e) => {
                warn!(page = page.index, path, error = %e, "Image could not be decoded, skipping page");
                None
            }
        }
    }

    fn px_to_mm(&self, px: u32) -> Mm {
        Mm(px as f32 / self.dpi * MM_PER_INCH)
    }

    /// Characters per text line for a page of the given width.
    fn line_width_chars(&self, page_width: Mm) -> usize {
        // Helvetica averages a little over half an em per character.
        let char_mm = self.font_size * MM_PER_PT * 0.55;
        let usable = (page_width.0 - 2.0 * self.margin.0).max(char_mm);
        (usable / char_mm).floor() as usize
    }

    fn draw_page(
        &self,
        layer: PdfLayerReference,
        font: &IndirectFontRef,
        page: &Page,
        image: DynamicImage,
        width: Mm,
        height: Mm,
    ) {
        Image::from_dynamic_image(&image).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(0.0)),
                dpi: Some(self.dpi),
                ..Default::default()
            },
        );

        let line_height = self.font_size * MM_PER_PT * 1.3;
        let mut y = height.0 - self.margin.0 - self.font_size * MM_PER_PT;
        for line in wrap_text(&page.text, self.line_width_chars(width)) {
            if y < self.margin.0 {
                debug!(page = page.index, "Page text truncated");
                break;
            }
            layer.use_text(line, self.font_size, self.margin, Mm(y), font);
            y -= line_height;
        }
    }
}

impl StorybookRenderer for PdfRenderer {
    #[instrument(skip(self, book), fields(title = %book.title, path = %path.display()))]
    fn render(&self, book: &Storybook, path: &Path) -> StorybookResult<Option<RenderSummary>> {
        let mut pages = book
            .pages
            .iter()
            .filter_map(|page| Self::load_image(page).map(|img| (page, img)));

        let Some((first, first_image)) = pages.next() else {
            info!("No illustrated pages, nothing to render");
            return Ok(None);
        };

        let (w, h) = first_image.dimensions();
        let (width, height) = (self.px_to_mm(w), self.px_to_mm(h));
        let (doc, page_idx, layer_idx) =
            PdfDocument::new(book.title.as_str(), width, height, "Page 1");
        let font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::new(format!("font: {}", e)))?;

        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        self.draw_page(layer, &font, first, first_image, width, height);
        let mut rendered = 1;

        for (page, image) in pages {
            let (w, h) = image.dimensions();
            let (width, height) = (self.px_to_mm(w), self.px_to_mm(h));
            let (page_idx, layer_idx) =
                doc.add_page(width, height, format!("Page {}", page.index));
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            self.draw_page(layer, &font, page, image, width, height);
            rendered += 1;
        }

        let file = File::create(path)
            .map_err(|e| RenderError::new(format!("{}: {}", path.display(), e)))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| RenderError::new(format!("{}: {}", path.display(), e)))?;

        let skipped = book.pages.len() - rendered;
        info!(rendered, skipped, "PDF written");
        Ok(Some(RenderSummary::new(path, rendered, skipped)))
    }
}
