//! In-memory [`DocumentSource`] stand-in for criterion unit tests.

use super::{DocumentMetadata, DocumentSource, Glyph, PageRaster, TextRun};
use crate::error::{Result, SourceError};

pub(crate) fn run(text: &str, size: f64) -> TextRun {
    TextRun {
        glyphs: text.chars().map(|ch| Glyph { ch, size }).collect(),
    }
}

pub(crate) struct StubPage {
    pub runs: Vec<TextRun>,
    pub links: Vec<String>,
    pub has_image: bool,
    pub raster: PageRaster,
}

impl StubPage {
    pub fn new() -> Self {
        StubPage {
            runs: Vec::new(),
            links: Vec::new(),
            has_image: false,
            raster: PageRaster::solid(10, 10, (255, 255, 255)),
        }
    }

    pub fn with_text(mut self, text: &str, size: f64) -> Self {
        self.runs.push(run(text, size));
        self
    }

    pub fn with_link(mut self, uri: &str) -> Self {
        self.links.push(uri.to_string());
        self
    }

    pub fn with_image(mut self) -> Self {
        self.has_image = true;
        self
    }

    pub fn with_raster(mut self, raster: PageRaster) -> Self {
        self.raster = raster;
        self
    }
}

pub(crate) struct StubSource {
    pub present: bool,
    pub size_bytes: u64,
    pub metadata: DocumentMetadata,
    pub pages: Vec<StubPage>,
    pub broken: bool,
}

impl StubSource {
    /// A well-formed one-page document that passes every default check.
    pub fn single_page() -> Self {
        Self::with_pages(1)
    }

    pub fn with_pages(count: usize) -> Self {
        StubSource {
            present: true,
            size_bytes: 100 * 1024,
            metadata: DocumentMetadata {
                author: Some("Jane Doe".to_string()),
                title: Some("Jane Doe Resume".to_string()),
                ..DocumentMetadata::default()
            },
            pages: (0..count)
                .map(|_| StubPage::new().with_text("Experienced software engineer", 12.0))
                .collect(),
            broken: false,
        }
    }

    /// A locator that points at nothing.
    pub fn missing() -> Self {
        let mut source = Self::single_page();
        source.present = false;
        source
    }

    /// Every accessor past `exists` fails, as for a corrupt file.
    pub fn failing() -> Self {
        let mut source = Self::single_page();
        source.broken = true;
        source
    }

    fn intact(&self) -> Result<()> {
        if self.broken {
            Err(SourceError::Parse("stub parse failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn page(&self, page: u32) -> Result<&StubPage> {
        self.intact()?;
        self.pages
            .get(page as usize)
            .ok_or(SourceError::InvalidPage(page))
    }
}

impl DocumentSource for StubSource {
    fn exists(&self) -> bool {
        self.present
    }

    fn page_count(&self) -> Result<u32> {
        self.intact()?;
        Ok(self.pages.len() as u32)
    }

    fn byte_size(&self) -> Result<u64> {
        self.intact()?;
        Ok(self.size_bytes)
    }

    fn metadata(&self) -> Result<DocumentMetadata> {
        self.intact()?;
        Ok(self.metadata.clone())
    }

    fn text_runs(&self, page: u32) -> Result<Vec<TextRun>> {
        Ok(self.page(page)?.runs.clone())
    }

    fn page_links(&self, page: u32) -> Result<Vec<String>> {
        Ok(self.page(page)?.links.clone())
    }

    fn has_embedded_image(&self, page: u32) -> Result<bool> {
        Ok(self.page(page)?.has_image)
    }

    fn render_page(&self, page: u32) -> Result<PageRaster> {
        Ok(self.page(page)?.raster.clone())
    }
}
