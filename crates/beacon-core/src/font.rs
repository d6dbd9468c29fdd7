//! 5×7 block font used to extrude the signage text.
//!
//! File format: a `[X]` header line per glyph followed by seven rows of five
//! cells, `#` for filled and `.` for empty. Blank lines and lines starting
//! with `;` are ignored.

use crate::mesh::{MeshData, Topology};
use fnv::FnvHashMap;
use glam::Vec3;

pub const GLYPH_COLS: usize = 5;
pub const GLYPH_ROWS: usize = 7;
const GLYPH_ADVANCE: usize = GLYPH_COLS + 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FontError {
    #[error("line {line}: expected a `[X]` glyph header")]
    MissingHeader { line: usize },
    #[error("line {line}: glyph `{glyph}` row must be 5 cells of `#` or `.`")]
    BadRow { glyph: char, line: usize },
    #[error("glyph `{glyph}` has {rows} rows, expected 7")]
    RowCount { glyph: char, rows: usize },
    #[error("font defines no glyphs")]
    Empty,
}

#[derive(Clone, Debug, Default)]
pub struct BlockFont {
    glyphs: FnvHashMap<char, [u8; GLYPH_ROWS]>,
}

impl BlockFont {
    pub fn parse(source: &str) -> Result<Self, FontError> {
        let mut glyphs = FnvHashMap::default();
        let mut current: Option<(char, Vec<u8>)> = None;

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            if let Some(glyph) = parse_header(line) {
                if let Some((prev, rows)) = current.take() {
                    glyphs.insert(prev, finish_glyph(prev, rows)?);
                }
                current = Some((glyph, Vec::with_capacity(GLYPH_ROWS)));
                continue;
            }
            let Some((glyph, rows)) = current.as_mut() else {
                return Err(FontError::MissingHeader { line: line_no });
            };
            rows.push(parse_row(line).ok_or(FontError::BadRow {
                glyph: *glyph,
                line: line_no,
            })?);
        }
        if let Some((prev, rows)) = current.take() {
            glyphs.insert(prev, finish_glyph(prev, rows)?);
        }
        if glyphs.is_empty() {
            return Err(FontError::Empty);
        }
        Ok(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Row bitmasks for `c`, bit 4 is the leftmost cell. Lookups are
    /// case-insensitive for ASCII letters.
    pub fn glyph(&self, c: char) -> Option<&[u8; GLYPH_ROWS]> {
        self.glyphs
            .get(&c)
            .or_else(|| self.glyphs.get(&c.to_ascii_uppercase()))
    }

    /// Extrude `text` into a mesh centered on the origin in XY, `depth` thick
    /// along Z. Characters without a glyph advance like a space.
    pub fn text_mesh(&self, text: &str, cell: f32, depth: f32) -> MeshData {
        let count = text.chars().count();
        let width_cells = (count * GLYPH_ADVANCE).saturating_sub(1) as f32;
        let origin_x = -width_cells * cell * 0.5;
        let origin_y = GLYPH_ROWS as f32 * cell * 0.5;
        let half_depth = depth * 0.5;

        let mut mesh = MeshData {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology: Topology::Triangles,
        };
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = self.glyph(c) else {
                continue;
            };
            let left = origin_x + (i * GLYPH_ADVANCE) as f32 * cell;
            for (r, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                        continue;
                    }
                    let x = left + col as f32 * cell;
                    let y = origin_y - (r + 1) as f32 * cell;
                    mesh.push_cuboid(
                        Vec3::new(x, y, -half_depth),
                        Vec3::new(x + cell, y + cell, half_depth),
                    );
                }
            }
        }
        mesh
    }
}

fn parse_header(line: &str) -> Option<char> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn parse_row(line: &str) -> Option<u8> {
    if line.chars().count() != GLYPH_COLS {
        return None;
    }
    line.chars().try_fold(0u8, |acc, c| match c {
        '#' => Some((acc << 1) | 1),
        '.' => Some(acc << 1),
        _ => None,
    })
}

fn finish_glyph(glyph: char, rows: Vec<u8>) -> Result<[u8; GLYPH_ROWS], FontError> {
    rows.try_into()
        .map_err(|rows: Vec<u8>| FontError::RowCount {
            glyph,
            rows: rows.len(),
        })
}
