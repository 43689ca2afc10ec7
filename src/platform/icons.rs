//! Icon generation.
//!
//! Draws the window icon programmatically so no image assets are shipped.

use eframe::egui::IconData;

/// Icon size in pixels.
pub const ICON_SIZE: u32 = 32;

/// Window icon: a rounded blue card with a white check mark.
pub fn app_icon() -> IconData {
    IconData {
        rgba: generate_checklist_icon(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

/// Generate the icon as RGBA data.
fn generate_checklist_icon() -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    let (r, g, b) = (0u8, 120u8, 215u8);
    let inset = 2.0;
    let corner = 6.0;

    // Rounded square
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 + 0.5;
            let fy = y as f32 + 0.5;
            let lo = inset + corner;
            let hi = size as f32 - inset - corner;
            let cx = fx.clamp(lo, hi);
            let cy = fy.clamp(lo, hi);
            let dist = ((fx - cx).powi(2) + (fy - cy).powi(2)).sqrt();

            if dist <= corner {
                let idx = (y * size + x) * 4;
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }

    // Check mark: short stroke down-right, long stroke up-right
    let mut plot = |x: usize, y: usize| {
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let (px, py) = (x + dx, y + dy);
            if px < size && py < size {
                let idx = (py * size + px) * 4;
                rgba[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
    };
    for i in 0..6 {
        plot(8 + i, 15 + i);
    }
    for i in 0..11 {
        plot(13 + i, 20 - i);
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_dimensions() {
        let icon = app_icon();
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
        // Corners are transparent, the centre is opaque.
        assert_eq!(icon.rgba[3], 0);
        let centre = ((16 * ICON_SIZE + 16) * 4) as usize;
        assert_eq!(icon.rgba[centre + 3], 255);
    }
}
