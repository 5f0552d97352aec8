//! Single-fact checks: existence, page count, file size, links, images,
//! metadata, and overall readability.

use super::{absorb, Criterion};
use crate::error::Result;
use crate::source::DocumentSource;

const BYTES_PER_KB: f64 = 1024.0;

/// The document locator points at a real file.
#[derive(Debug, Default)]
pub struct FileExists;

impl FileExists {
    pub fn new() -> Self {
        FileExists
    }
}

impl Criterion for FileExists {
    fn name(&self) -> &'static str {
        "PDF File Exists"
    }

    fn description(&self) -> &str {
        "Validates that the CV PDF file exists at the specified path"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        source.exists()
    }
}

/// The page count stays within the configured maximum.
#[derive(Debug)]
pub struct PageLimit {
    max_pages: u32,
}

impl PageLimit {
    pub fn new(max_pages: u32) -> Self {
        PageLimit { max_pages }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        Ok(source.page_count()? <= self.max_pages)
    }
}

impl Criterion for PageLimit {
    fn name(&self) -> &'static str {
        "Single Page Limit"
    }

    fn description(&self) -> &str {
        "Ensures the CV is exactly one page or less"
    }

    fn weight(&self) -> f64 {
        15.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}

/// The file on disk stays within the configured kilobyte limit.
#[derive(Debug)]
pub struct FileSize {
    max_kb: f64,
    description: String,
}

impl FileSize {
    pub fn new(max_kb: f64) -> Self {
        FileSize {
            description: format!(
                "Validates that the PDF file size is within {max_kb}KB limit"
            ),
            max_kb,
        }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        let size_kb = source.byte_size()? as f64 / BYTES_PER_KB;
        Ok(size_kb <= self.max_kb)
    }
}

impl Criterion for FileSize {
    fn name(&self) -> &'static str {
        "File Size Constraint"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn weight(&self) -> f64 {
        8.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}

/// Every clickable link uses the HTTPS scheme.
#[derive(Debug)]
pub struct HttpsLinks {
    enforce: bool,
}

impl HttpsLinks {
    pub fn new(enforce: bool) -> Self {
        HttpsLinks { enforce }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        for page in 0..source.page_count()? {
            for link in source.page_links(page)? {
                if !link.starts_with("https://") {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl Criterion for HttpsLinks {
    fn name(&self) -> &'static str {
        "HTTPS Links Only"
    }

    fn description(&self) -> &str {
        "Validates that all links in the PDF use HTTPS protocol"
    }

    fn weight(&self) -> f64 {
        7.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        if !self.enforce {
            return true;
        }
        absorb(self.name(), self.check(source))
    }
}

/// No page carries an embedded image.
#[derive(Debug)]
pub struct NoImages {
    prohibit: bool,
}

impl NoImages {
    pub fn new(prohibit: bool) -> Self {
        NoImages { prohibit }
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        for page in 0..source.page_count()? {
            if source.has_embedded_image(page)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Criterion for NoImages {
    fn name(&self) -> &'static str {
        "No Embedded Images"
    }

    fn description(&self) -> &str {
        "Ensures the PDF contains no embedded images"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        if !self.prohibit {
            return true;
        }
        absorb(self.name(), self.check(source))
    }
}

/// Author and title metadata are present and every page yields text.
#[derive(Debug, Default)]
pub struct Structure;

impl Structure {
    pub fn new() -> Self {
        Structure
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        let metadata = source.metadata()?;
        let filled =
            |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
        if !filled(&metadata.author) || !filled(&metadata.title) {
            return Ok(false);
        }
        for page in 0..source.page_count()? {
            if source.page_text(page)?.trim().is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Criterion for Structure {
    fn name(&self) -> &'static str {
        "PDF Structure and Metadata"
    }

    fn description(&self) -> &str {
        "Validates PDF metadata (author, title) and text readability"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}

/// The document opens, has at least one page, and every page decodes.
#[derive(Debug, Default)]
pub struct Integrity;

impl Integrity {
    pub fn new() -> Self {
        Integrity
    }

    fn check(&self, source: &dyn DocumentSource) -> Result<bool> {
        let pages = source.page_count()?;
        if pages == 0 {
            return Ok(false);
        }
        for page in 0..pages {
            source.page_text(page)?;
        }
        Ok(true)
    }
}

impl Criterion for Integrity {
    fn name(&self) -> &'static str {
        "PDF Integrity"
    }

    fn description(&self) -> &str {
        "Ensures the PDF is not corrupted and can be properly read"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn evaluate(&self, source: &dyn DocumentSource) -> bool {
        absorb(self.name(), self.check(source))
    }
}
