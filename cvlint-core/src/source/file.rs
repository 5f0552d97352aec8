//! lopdf-backed implementation of [`DocumentSource`].

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::raster::rasterize;
use super::text::{glyph_runs, operand_f64};
use super::{DocumentMetadata, DocumentSource, PageRaster, TextRun};
use crate::error::{Result, SourceError};

/// Letter size in points, used when a page carries no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// Cap on reference and Parent chains, against cyclic documents.
const MAX_CHAIN: usize = 32;

/// A PDF file on disk.
///
/// The document is parsed lazily on first access and cached for the life of
/// the source, so a sequence of checks pays the load cost once.
pub struct FileSource {
    path: PathBuf,
    loaded: OnceCell<(Document, Vec<ObjectId>)>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource {
            path: path.into(),
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn document(&self) -> Result<&(Document, Vec<ObjectId>)> {
        if let Some(loaded) = self.loaded.get() {
            return Ok(loaded);
        }
        let doc = Document::load(&self.path)?;
        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        debug!(
            path = %self.path.display(),
            pages = page_ids.len(),
            "loaded document"
        );
        Ok(self.loaded.get_or_init(|| (doc, page_ids)))
    }

    fn page_dict(&self, page: u32) -> Result<(&Document, &Dictionary)> {
        let (doc, page_ids) = self.document()?;
        let id = page_ids
            .get(page as usize)
            .copied()
            .ok_or(SourceError::InvalidPage(page))?;
        let dict = doc.get_object(id).and_then(Object::as_dict)?;
        Ok((doc, dict))
    }
}

/// Follow reference chains to the underlying object.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    let mut obj = obj;
    for _ in 0..MAX_CHAIN {
        match obj {
            Object::Reference(id) => obj = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

/// Look up a page attribute, walking Parent links for inherited values.
fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_CHAIN {
        if let Ok(value) = node.get(key) {
            return resolve(doc, value);
        }
        node = resolve(doc, node.get(b"Parent").ok()?)?.as_dict().ok()?;
    }
    None
}

/// Decode a PDF text string: UTF-16BE behind a BOM, otherwise UTF-8 with a
/// Latin-1 fallback.
fn decode_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

fn string_value(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?)? {
        Object::String(bytes, _) => Some(decode_string(bytes)),
        _ => None,
    }
}

fn stream_bytes(stream: &Stream) -> Vec<u8> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone())
    } else {
        stream.content.clone()
    }
}

/// Collect a page's content stream bytes, concatenating stream arrays.
fn content_bytes(doc: &Document, page: &Dictionary) -> Vec<u8> {
    let contents = match page.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Vec::new(),
    };
    match resolve(doc, contents) {
        Some(Object::Stream(stream)) => stream_bytes(stream),
        Some(Object::Array(items)) => {
            let mut bytes = Vec::new();
            for item in items {
                if let Some(Object::Stream(stream)) = resolve(doc, item) {
                    if !bytes.is_empty() {
                        bytes.push(b' ');
                    }
                    bytes.extend_from_slice(&stream_bytes(stream));
                }
            }
            bytes
        }
        _ => Vec::new(),
    }
}

fn page_size(doc: &Document, page: &Dictionary) -> (f64, f64) {
    let media_box: Option<Vec<f64>> = inherited(doc, page, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .map(|arr| arr.iter().filter_map(operand_f64).collect());
    match media_box.as_deref() {
        Some([x0, y0, x1, y1, ..]) => ((x1 - x0).abs(), (y1 - y0).abs()),
        _ => DEFAULT_PAGE_SIZE,
    }
}

impl DocumentSource for FileSource {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn page_count(&self) -> Result<u32> {
        let (_, page_ids) = self.document()?;
        Ok(page_ids.len() as u32)
    }

    fn byte_size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    fn metadata(&self) -> Result<DocumentMetadata> {
        let (doc, _) = self.document()?;
        let info = doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_dict().ok());
        let Some(info) = info else {
            return Ok(DocumentMetadata::default());
        };
        Ok(DocumentMetadata {
            author: string_value(doc, info, b"Author"),
            title: string_value(doc, info, b"Title"),
            subject: string_value(doc, info, b"Subject"),
            creator: string_value(doc, info, b"Creator"),
            producer: string_value(doc, info, b"Producer"),
        })
    }

    fn text_runs(&self, page: u32) -> Result<Vec<TextRun>> {
        let (doc, dict) = self.page_dict(page)?;
        let content = Content::decode(&content_bytes(doc, dict))?;
        Ok(glyph_runs(&content))
    }

    fn page_links(&self, page: u32) -> Result<Vec<String>> {
        let (doc, dict) = self.page_dict(page)?;
        let annots = dict
            .get(b"Annots")
            .ok()
            .and_then(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_array().ok());
        let Some(annots) = annots else {
            return Ok(Vec::new());
        };

        let mut links = Vec::new();
        for annot in annots {
            let Some(annot) = resolve(doc, annot).and_then(|obj| obj.as_dict().ok()) else {
                continue;
            };
            let action = annot
                .get(b"A")
                .ok()
                .and_then(|obj| resolve(doc, obj))
                .and_then(|obj| obj.as_dict().ok());
            if let Some(action) = action {
                if let Some(uri) = string_value(doc, action, b"URI") {
                    links.push(uri);
                }
            }
        }
        Ok(links)
    }

    fn has_embedded_image(&self, page: u32) -> Result<bool> {
        let (doc, dict) = self.page_dict(page)?;
        let xobjects = inherited(doc, dict, b"Resources")
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_dict().ok());
        let Some(xobjects) = xobjects else {
            return Ok(false);
        };
        for (_, value) in xobjects.iter() {
            let Some(Object::Stream(stream)) = resolve(doc, value) else {
                continue;
            };
            if let Ok(Object::Name(subtype)) = stream.dict.get(b"Subtype") {
                if subtype.as_slice() == b"Image" {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn render_page(&self, page: u32) -> Result<PageRaster> {
        let (doc, dict) = self.page_dict(page)?;
        let (width, height) = page_size(doc, dict);
        let content = Content::decode(&content_bytes(doc, dict))?;
        Ok(rasterize(width, height, &content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_does_not_exist() {
        let source = FileSource::new("/nonexistent/resume.pdf");
        assert!(!source.exists());
        assert!(source.page_count().is_err());
    }

    #[test]
    fn test_decode_plain_and_utf16_strings() {
        assert_eq!(decode_string(b"Jane Doe"), "Jane Doe");
        // UTF-16BE with BOM
        assert_eq!(decode_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
        // Latin-1 fallback for a lone high byte
        assert_eq!(decode_string(&[0xE9]), "\u{e9}");
    }

    #[test]
    fn test_path_accessor() {
        let source = FileSource::new("resume.pdf");
        assert_eq!(source.path(), Path::new("resume.pdf"));
    }
}
