//! Procedural texture for the ground indicator disk: a cyan radial glow,
//! three concentric rings and eight radial scan lines.

const CYAN: [u8; 3] = [0, 255, 255];

// Radii and alphas are authored for a 256 px texture and scaled otherwise.
const AUTHORED_SIZE: f32 = 256.0;
const GLOW_STOPS: [(f32, f32); 3] = [(0.0, 0.5), (0.5, 0.2), (1.0, 0.0)];
const RING_RADII: [f32; 3] = [50.0, 80.0, 110.0];
const RING_WIDTH: f32 = 2.0;
const RING_ALPHA: f32 = 0.5;
const SCAN_LINES: usize = 8;
const SCAN_WIDTH: f32 = 1.0;
const SCAN_ALPHA: f32 = 0.3;

/// RGBA8 pixels (straight alpha), row-major, `size * size * 4` bytes.
pub fn indicator_texture(size: u32) -> Vec<u8> {
    let size = size.max(1);
    let k = size as f32 / AUTHORED_SIZE;
    let center = size as f32 * 0.5;
    let glow_radius = center;

    let mut out = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5 - center;
            let py = y as f32 + 0.5 - center;
            let dist = (px * px + py * py).sqrt();

            let mut alpha = glow_alpha(dist / glow_radius);
            for r in RING_RADII {
                let cover = stroke_coverage((dist - r * k).abs(), RING_WIDTH * k);
                alpha = over(alpha, RING_ALPHA * cover);
            }
            for i in 0..SCAN_LINES {
                let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                let d = segment_distance(px, py, angle, center);
                alpha = over(alpha, SCAN_ALPHA * stroke_coverage(d, SCAN_WIDTH * k));
            }

            out.extend_from_slice(&CYAN);
            out.push((alpha.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }
    out
}

fn glow_alpha(t: f32) -> f32 {
    if t >= 1.0 {
        return 0.0;
    }
    for pair in GLOW_STOPS.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            let f = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
            return a0 + (a1 - a0) * f;
        }
    }
    0.0
}

/// Antialiased coverage of a stroke of `width` at distance `d` from its center line.
#[inline]
fn stroke_coverage(d: f32, width: f32) -> f32 {
    (width * 0.5 + 0.5 - d).clamp(0.0, 1.0)
}

/// Source-over compositing of two alphas of the same color.
#[inline]
fn over(dst: f32, src: f32) -> f32 {
    src + dst * (1.0 - src)
}

/// Distance from `(px, py)` to the segment from the origin along `angle` of `length`.
fn segment_distance(px: f32, py: f32, angle: f32, length: f32) -> f32 {
    let (dy, dx) = angle.sin_cos();
    let t = (px * dx + py * dy).clamp(0.0, length);
    let (cx, cy) = (dx * t, dy * t);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
