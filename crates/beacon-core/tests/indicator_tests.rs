use beacon_core::indicator::indicator_texture;

const SIZE: u32 = 256;

fn alpha(pixels: &[u8], x: u32, y: u32) -> u8 {
    pixels[((y * SIZE + x) * 4 + 3) as usize]
}

#[test]
fn texture_is_cyan_rgba() {
    let pixels = indicator_texture(SIZE);
    assert_eq!(pixels.len(), (SIZE * SIZE * 4) as usize);
    for px in pixels.chunks_exact(4) {
        assert_eq!(&px[..3], &[0, 255, 255]);
    }
}

#[test]
fn glow_fades_to_transparent_corners() {
    let pixels = indicator_texture(SIZE);
    let center = alpha(&pixels, 128, 128);
    assert!(center as f32 >= 0.45 * 255.0, "center alpha {center}");
    for (x, y) in [(0, 0), (SIZE - 1, 0), (0, SIZE - 1), (SIZE - 1, SIZE - 1)] {
        assert_eq!(alpha(&pixels, x, y), 0);
    }
}

#[test]
fn rings_brighten_their_radius() {
    let pixels = indicator_texture(SIZE);
    // Both samples sit between the 0 and 45 degree scan lines.
    let on_ring = alpha(&pixels, 201, 158); // r ~ 80
    let between = alpha(&pixels, 187, 152); // r ~ 64
    assert!(on_ring as f32 > between as f32 + 0.2 * 255.0, "{on_ring} vs {between}");
}

#[test]
fn scan_lines_are_visible() {
    let pixels = indicator_texture(SIZE);
    // Straight down from the center at r ~ 95: on the 90 degree line.
    let on_line = alpha(&pixels, 127, 223);
    let off_line = alpha(&pixels, 160, 216);
    assert!(on_line > off_line, "{on_line} vs {off_line}");
}

#[test]
fn small_sizes_do_not_panic() {
    assert_eq!(indicator_texture(0).len(), 4);
    assert_eq!(indicator_texture(3).len(), 36);
}
