//! Read-only access to the document under validation.
//!
//! The [`DocumentSource`] trait is the seam between the criterion predicates
//! and the PDF machinery: predicates only ever see page counts, glyph runs,
//! link URIs, metadata fields, and rendered pixels. The production
//! implementation is [`FileSource`], backed by `lopdf`; tests substitute
//! in-memory stand-ins.

mod file;
mod raster;
mod text;

pub use file::FileSource;

use crate::error::Result;

/// One rendered character together with its effective font size in points.
///
/// The size accounts for the text and transformation matrices in effect when
/// the glyph was shown, not just the `Tf` operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub size: f64,
}

/// A consecutive sequence of glyphs shown by a single text operation.
#[derive(Debug, Clone, Default)]
pub struct TextRun {
    pub glyphs: Vec<Glyph>,
}

impl TextRun {
    /// The run's characters as a string, sizes discarded.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}

/// Document information fields, all optional in the file format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub author: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

/// A rendered page as an RGB pixel grid.
///
/// Row-major with row 0 at the top of the page, one point per pixel.
#[derive(Debug, Clone)]
pub struct PageRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PageRaster {
    /// Wrap a raw RGB buffer. `data` must hold `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        PageRaster {
            width,
            height,
            data,
        }
    }

    /// A single-color raster, useful as a canvas or a test fixture.
    pub fn solid(width: u32, height: u32, color: (u8, u8, u8)) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.0, color.1, color.2]);
        }
        PageRaster::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at column `x`, row `y` (row 0 is the top of the page).
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = ((y * self.width + x) * 3) as usize;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Iterate over every pixel in row-major order without allocating.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.data.chunks_exact(3).map(|px| (px[0], px[1], px[2]))
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Read-only facade over one PDF document.
///
/// Pages are indexed from 0. Every accessor except [`exists`] may fail with a
/// [`SourceError`](crate::error::SourceError) when the document cannot be
/// opened or decoded; criterion predicates treat any such failure as a failed
/// check.
///
/// [`exists`]: DocumentSource::exists
pub trait DocumentSource {
    /// Whether the document locator points at a regular file.
    fn exists(&self) -> bool;

    /// Number of pages in the document.
    fn page_count(&self) -> Result<u32>;

    /// Size of the raw document on persistent storage, in bytes.
    fn byte_size(&self) -> Result<u64>;

    /// Document information fields.
    fn metadata(&self) -> Result<DocumentMetadata>;

    /// The positioned text runs of one page, in content order.
    fn text_runs(&self, page: u32) -> Result<Vec<TextRun>>;

    /// URI strings of the clickable link annotations on one page.
    fn page_links(&self, page: u32) -> Result<Vec<String>>;

    /// Whether the page's resources carry an image XObject.
    fn has_embedded_image(&self, page: u32) -> Result<bool>;

    /// Render one page to an RGB raster.
    fn render_page(&self, page: u32) -> Result<PageRaster>;

    /// Extracted text of one page.
    fn page_text(&self, page: u32) -> Result<String> {
        Ok(self
            .text_runs(page)?
            .iter()
            .map(TextRun::text)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Extracted text of every page, concatenated in page order.
    fn full_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in 0..self.page_count()? {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&self.page_text(page)?);
        }
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod stub;
