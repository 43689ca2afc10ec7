//! Global pointer position.
//!
//! The panel needs the pointer even when it has no focus and is off-screen,
//! so the position is read from the OS instead of from window events.

use crate::edge::Position;

/// Whether this platform can report the pointer outside our own window.
pub fn is_supported() -> bool {
    cfg!(windows)
}

/// Current pointer position in physical screen pixels.
#[cfg(windows)]
pub fn global_cursor_position() -> Option<Position> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut pt = POINT::default();
    unsafe { GetCursorPos(&mut pt) }.ok()?;
    Some(Position::new(pt.x as f64, pt.y as f64))
}

/// Current pointer position in physical screen pixels.
#[cfg(not(windows))]
pub fn global_cursor_position() -> Option<Position> {
    None
}

/// Convert a physical-pixel position to logical points.
pub fn to_points(physical: Position, pixels_per_point: f32) -> Position {
    let scale = if pixels_per_point > 0.0 {
        pixels_per_point as f64
    } else {
        1.0
    };
    Position::new(physical.x / scale, physical.y / scale)
}
