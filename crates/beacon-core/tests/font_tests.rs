use beacon_core::constants::SIGNAGE_TEXT;
use beacon_core::font::*;

const BUNDLED: &str = include_str!("../../../assets/fonts/block5x7.txt");

const LETTER_A: &str = "\
; test font
[A]
.###.
#...#
#...#
#####
#...#
#...#
#...#
";

#[test]
fn parses_glyph_rows_as_bitmasks() {
    let font = BlockFont::parse(LETTER_A).unwrap();
    assert_eq!(font.len(), 1);
    let rows = font.glyph('A').unwrap();
    assert_eq!(rows[0], 0b01110);
    assert_eq!(rows[3], 0b11111);
    assert_eq!(rows[6], 0b10001);
    assert_eq!(font.glyph('a'), Some(rows));
    assert!(font.glyph('B').is_none());
}

#[test]
fn reports_malformed_sources() {
    assert_eq!(BlockFont::parse("#...#").unwrap_err(), FontError::MissingHeader { line: 1 });
    assert_eq!(
        BlockFont::parse("[A]\n#..#").unwrap_err(),
        FontError::BadRow { glyph: 'A', line: 2 }
    );
    assert_eq!(
        BlockFont::parse("[A]\n#x..#").unwrap_err(),
        FontError::BadRow { glyph: 'A', line: 2 }
    );
    assert_eq!(
        BlockFont::parse("[A]\n#####\n#####").unwrap_err(),
        FontError::RowCount { glyph: 'A', rows: 2 }
    );
    assert_eq!(BlockFont::parse("; nothing\n\n").unwrap_err(), FontError::Empty);
}

#[test]
fn text_mesh_is_centered_cuboids() {
    let font = BlockFont::parse(LETTER_A).unwrap();
    let cell = 0.1;
    let mesh = font.text_mesh("A", cell, 0.2);
    // 18 filled cells, one box each.
    assert_eq!(mesh.vertices.len(), 18 * 24);
    assert_eq!(mesh.indices.len(), 18 * 36);
    let (lo, hi) = mesh.bounds().unwrap();
    assert!((lo.x + 2.5 * cell).abs() < 1e-5 && (hi.x - 2.5 * cell).abs() < 1e-5);
    assert!((lo.y + 3.5 * cell).abs() < 1e-5 && (hi.y - 3.5 * cell).abs() < 1e-5);
    assert!((lo.z + 0.1).abs() < 1e-6 && (hi.z - 0.1).abs() < 1e-6);
}

#[test]
fn unknown_characters_advance_without_geometry() {
    let font = BlockFont::parse(LETTER_A).unwrap();
    let single = font.text_mesh("A", 1.0, 1.0);
    let spaced = font.text_mesh("A?A", 1.0, 1.0);
    assert_eq!(spaced.vertices.len(), single.vertices.len() * 2);
    let (lo, hi) = spaced.bounds().unwrap();
    // Three advances of six cells, minus the trailing gap, centered.
    assert!((lo.x + 8.5).abs() < 1e-5 && (hi.x - 8.5).abs() < 1e-5);
}

#[test]
fn bundled_font_covers_signage_text() {
    let font = BlockFont::parse(BUNDLED).unwrap();
    assert!(font.len() >= 27);
    for c in SIGNAGE_TEXT.chars() {
        assert!(font.glyph(c).is_some(), "missing glyph {c:?}");
    }
    let mesh = font.text_mesh(SIGNAGE_TEXT, 0.08, 0.08);
    assert!(!mesh.vertices.is_empty());
    let (lo, hi) = mesh.bounds().unwrap();
    assert!((lo.x + hi.x).abs() < 1e-4);
}
