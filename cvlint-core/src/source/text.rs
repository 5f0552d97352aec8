//! Content-stream interpretation for positioned text.
//!
//! [`TextState`] is the PDF text state machine (text matrix, line matrix,
//! CTM, leading, selected font size). Feeding it one operation at a time
//! yields a [`Shown`] record for every show operator, carrying the shown
//! bytes plus the device-space pen position and effective glyph size. The
//! text extractor turns those records into [`TextRun`]s; the rasterizer
//! turns them into ink.
//!
//! String bytes are decoded as Latin-1. The simple-font encodings emitted by
//! resume generators are ASCII-transparent for letters, which is all the
//! downstream checks consume; CMap-driven composite fonts are out of scope.

use lopdf::content::{Content, Operation};
use lopdf::Object;

use super::{Glyph, TextRun};

/// Affine matrix `[a, b, c, d, e, f]` mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
pub(crate) type Matrix = [f64; 6];

pub(crate) const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

pub(crate) fn multiply_matrix(a: &Matrix, b: &Matrix) -> Matrix {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

pub(crate) fn translation(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

pub(crate) fn transform_point(x: f64, y: f64, m: &Matrix) -> (f64, f64) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

/// Length of the image of the unit vertical vector: the factor a nominal
/// font size is stretched by on the page.
pub(crate) fn vertical_scale(m: &Matrix) -> f64 {
    (m[2] * m[2] + m[3] * m[3]).sqrt()
}

pub(crate) fn horizontal_scale(m: &Matrix) -> f64 {
    (m[0] * m[0] + m[1] * m[1]).sqrt()
}

pub(crate) fn operand_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn matrix_operands(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut matrix = [0.0; 6];
    for (slot, obj) in matrix.iter_mut().zip(operands) {
        *slot = operand_f64(obj)?;
    }
    Some(matrix)
}

/// One show operation, captured before the pen advances past it.
pub(crate) struct Shown {
    /// Raw string bytes of the show operator.
    pub bytes: Vec<u8>,
    /// Device-space baseline position of the first glyph.
    pub pen: (f64, f64),
    /// Effective glyph height in device units.
    pub size: f64,
    /// Heuristic advance per glyph in device units (half an em).
    pub glyph_width: f64,
}

pub(crate) struct TextState {
    ctm: Matrix,
    text_matrix: Matrix,
    text_line_matrix: Matrix,
    font_size: f64,
    leading: f64,
    stack: Vec<(Matrix, f64, f64)>,
}

impl TextState {
    pub fn new() -> Self {
        TextState {
            ctm: IDENTITY,
            text_matrix: IDENTITY,
            text_line_matrix: IDENTITY,
            font_size: 0.0,
            leading: 0.0,
            stack: Vec::new(),
        }
    }

    pub fn ctm(&self) -> Matrix {
        self.ctm
    }

    fn save(&mut self) {
        self.stack.push((self.ctm, self.font_size, self.leading));
    }

    fn restore(&mut self) {
        if let Some((ctm, font_size, leading)) = self.stack.pop() {
            self.ctm = ctm;
            self.font_size = font_size;
            self.leading = leading;
        }
    }

    fn begin_text(&mut self) {
        self.text_matrix = IDENTITY;
        self.text_line_matrix = IDENTITY;
    }

    fn translate_line(&mut self, tx: f64, ty: f64) {
        self.text_line_matrix = multiply_matrix(&translation(tx, ty), &self.text_line_matrix);
        self.text_matrix = self.text_line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    fn show(&mut self, operand: Option<&Object>) -> Option<Shown> {
        match operand {
            Some(Object::String(bytes, _)) => self.show_bytes(bytes.clone()),
            _ => None,
        }
    }

    fn show_bytes(&mut self, bytes: Vec<u8>) -> Option<Shown> {
        if bytes.is_empty() {
            return None;
        }
        let trm = multiply_matrix(&self.text_matrix, &self.ctm);
        let shown = Shown {
            pen: transform_point(0.0, 0.0, &trm),
            size: self.font_size * vertical_scale(&trm),
            glyph_width: 0.5 * self.font_size * horizontal_scale(&trm),
            bytes,
        };
        // Advance the pen half an em per glyph for subsequent shows
        let advance = shown.bytes.len() as f64 * self.font_size * 0.5;
        self.text_matrix = multiply_matrix(&translation(advance, 0.0), &self.text_matrix);
        Some(shown)
    }

    /// Apply one content operation to the state.
    ///
    /// Returns the shown text when the operation is a show operator;
    /// operations outside the text machinery are ignored.
    pub fn apply(&mut self, op: &Operation) -> Option<Shown> {
        match op.operator.as_str() {
            "q" => {
                self.save();
                None
            }
            "Q" => {
                self.restore();
                None
            }
            "cm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    self.ctm = multiply_matrix(&m, &self.ctm);
                }
                None
            }
            "BT" => {
                self.begin_text();
                None
            }
            "Tf" => {
                if let Some(size) = op.operands.get(1).and_then(operand_f64) {
                    self.font_size = size;
                }
                None
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(operand_f64) {
                    self.leading = leading;
                }
                None
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (
                    op.operands.first().and_then(operand_f64),
                    op.operands.get(1).and_then(operand_f64),
                ) {
                    self.translate_line(tx, ty);
                }
                None
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (
                    op.operands.first().and_then(operand_f64),
                    op.operands.get(1).and_then(operand_f64),
                ) {
                    self.leading = -ty;
                    self.translate_line(tx, ty);
                }
                None
            }
            "Tm" => {
                if let Some(m) = matrix_operands(&op.operands) {
                    self.text_matrix = m;
                    self.text_line_matrix = m;
                }
                None
            }
            "T*" => {
                self.next_line();
                None
            }
            "Tj" => self.show(op.operands.first()),
            "'" => {
                self.next_line();
                self.show(op.operands.first())
            }
            "\"" => {
                // Word and character spacing operands do not affect glyph size
                self.next_line();
                self.show(op.operands.get(2))
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let mut bytes = Vec::new();
                    for item in items {
                        if let Object::String(chunk, _) = item {
                            bytes.extend_from_slice(chunk);
                        }
                    }
                    self.show_bytes(bytes)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Interpret a page content stream into text runs, one per show operation.
pub(crate) fn glyph_runs(content: &Content) -> Vec<TextRun> {
    let mut state = TextState::new();
    let mut runs = Vec::new();

    for op in &content.operations {
        if let Some(shown) = state.apply(op) {
            let glyphs = shown
                .bytes
                .iter()
                .map(|&b| Glyph {
                    ch: b as char,
                    size: shown.size,
                })
                .collect();
            runs.push(TextRun { glyphs });
        }
    }

    runs
}
