//! Synthetic resume PDFs assembled with lopdf.
//!
//! The builder produces small but structurally honest documents: a real page
//! tree, content streams with positioned text, link annotations, image
//! XObjects, and an Info dictionary, so the full parsing and rendering path
//! gets exercised.

use std::fs;
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;

struct PageSpec {
    lines: Vec<(String, f64)>,
}

pub struct PdfFixture {
    pages: Vec<PageSpec>,
    author: Option<String>,
    title: Option<String>,
    links: Vec<String>,
    with_image: bool,
    background: Option<(f64, f64, f64)>,
    text_color: Option<(f64, f64, f64)>,
    pad_bytes: usize,
}

impl PdfFixture {
    /// One empty page with complete metadata; add lines before building.
    pub fn new() -> Self {
        PdfFixture {
            pages: vec![PageSpec { lines: Vec::new() }],
            author: Some("Jane Doe".to_string()),
            title: Some("Jane Doe Resume".to_string()),
            links: Vec::new(),
            with_image: false,
            background: None,
            text_color: None,
            pad_bytes: 0,
        }
    }

    /// A one-page resume that satisfies every default criterion.
    pub fn clean() -> Self {
        PdfFixture::new()
            .line("Jane Doe", 16.0)
            .line("Senior Software Engineer", 12.0)
            .line("Experienced engineer building reliable backend services", 11.0)
            .line("Skilled with databases and distributed systems", 11.0)
    }

    /// Append a text line to the most recent page.
    pub fn line(mut self, text: &str, size: f64) -> Self {
        self.pages
            .last_mut()
            .expect("fixture always has a page")
            .lines
            .push((text.to_string(), size));
        self
    }

    /// Start a new page; subsequent lines land on it.
    pub fn page(mut self) -> Self {
        self.pages.push(PageSpec { lines: Vec::new() });
        self
    }

    pub fn author(mut self, author: Option<&str>) -> Self {
        self.author = author.map(str::to_string);
        self
    }

    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    /// Attach a link annotation to the first page.
    pub fn link(mut self, uri: &str) -> Self {
        self.links.push(uri.to_string());
        self
    }

    /// Embed a 1x1 image XObject in the first page's resources.
    pub fn image(mut self) -> Self {
        self.with_image = true;
        self
    }

    /// Paint a full-page background before the text.
    pub fn background(mut self, r: f64, g: f64, b: f64) -> Self {
        self.background = Some((r, g, b));
        self
    }

    /// Fill color for the text ink, black when unset.
    pub fn text_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.text_color = Some((r, g, b));
        self
    }

    /// Grow the file with an unreferenced stream of this many bytes.
    pub fn pad_bytes(mut self, bytes: usize) -> Self {
        self.pad_bytes = bytes;
        self
    }

    fn page_content(&self, page: &PageSpec) -> Vec<u8> {
        let mut content = String::new();
        if let Some((r, g, b)) = self.background {
            content.push_str(&format!(
                "{r} {g} {b} rg\n0 0 {PAGE_WIDTH} {PAGE_HEIGHT} re\nf\n"
            ));
        }
        let (r, g, b) = self.text_color.unwrap_or((0.0, 0.0, 0.0));
        content.push_str(&format!("{r} {g} {b} rg\n"));

        content.push_str("BT\n");
        let mut y = 720.0;
        for (text, size) in &page.lines {
            content.push_str(&format!(
                "/F1 {size} Tf\n1 0 0 1 72 {y} Tm\n({}) Tj\n",
                escape_pdf_text(text)
            ));
            y -= 20.0;
        }
        content.push_str("ET\n");
        content.into_bytes()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let image_id = if self.with_image {
            Some(doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                },
                vec![255, 0, 0],
            )))
        } else {
            None
        };

        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for (index, page) in self.pages.iter().enumerate() {
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, self.page_content(page)));

            let mut resources = dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(font_id),
                },
            };
            if index == 0 {
                if let Some(image_id) = image_id {
                    resources.set(
                        "XObject",
                        dictionary! { "Im0" => Object::Reference(image_id) },
                    );
                }
            }

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => resources,
            };
            if index == 0 && !self.links.is_empty() {
                let annots: Vec<Object> = self
                    .links
                    .iter()
                    .map(|uri| {
                        let annot_id = doc.add_object(dictionary! {
                            "Type" => "Annot",
                            "Subtype" => "Link",
                            "Rect" => vec![
                                Object::Integer(72),
                                Object::Integer(680),
                                Object::Integer(300),
                                Object::Integer(695),
                            ],
                            "A" => dictionary! {
                                "S" => "URI",
                                "URI" => Object::String(
                                    uri.clone().into_bytes(),
                                    StringFormat::Literal,
                                ),
                            },
                        });
                        Object::Reference(annot_id)
                    })
                    .collect();
                page_dict.set("Annots", annots);
            }

            kids.push(Object::Reference(doc.add_object(page_dict)));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        if self.author.is_some() || self.title.is_some() {
            let mut info = Dictionary::new();
            if let Some(author) = &self.author {
                info.set("Author", Object::string_literal(author.as_str()));
            }
            if let Some(title) = &self.title {
                info.set("Title", Object::string_literal(title.as_str()));
            }
            let info_id = doc.add_object(Object::Dictionary(info));
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        if self.pad_bytes > 0 {
            doc.add_object(Stream::new(dictionary! {}, vec![b' '; self.pad_bytes]));
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).expect("fixture serializes");
        buffer
    }

    pub fn write_to(&self, path: &Path) {
        fs::write(path, self.build()).expect("fixture writes");
    }

    /// Write a deliberately truncated copy that no parser can load.
    pub fn write_corrupt_to(&self, path: &Path) {
        let bytes = self.build();
        fs::write(path, &bytes[..bytes.len() / 2]).expect("fixture writes");
    }
}

fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
