//! Auto-hide edge trigger.
//!
//! Decides whether the panel is shown from periodic pointer samples: the
//! panel opens when the pointer touches a thin strip along the screen edge
//! and closes once the pointer leaves the panel itself.

use serde::Deserialize;

/// Rectangle in screen coordinates (logical points).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

/// Position in screen coordinates (logical points).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen edge hosting the trigger strip and the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenEdge {
    Left,
    #[default]
    Right,
}

impl ScreenEdge {
    /// Full-height strip of `width` along this edge of `screen`.
    pub fn strip(&self, screen: Rect, width: f64) -> Rect {
        let width = width.clamp(0.0, screen.width());
        match self {
            ScreenEdge::Left => Rect::from_origin_size(screen.left, screen.top, width, screen.height()),
            ScreenEdge::Right => Rect::from_origin_size(
                screen.right - width,
                screen.top,
                width,
                screen.height(),
            ),
        }
    }
}

/// Whether the panel hides itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Shown from the edge strip, hidden when the pointer leaves
    #[default]
    AutoHide,

    /// Always shown
    Pinned,
}

/// Panel visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Visible,
}

/// A state change produced by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Show,
    Hide,
}

/// Hidden/Visible state machine driven by pointer samples.
#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    state: PanelState,
    mode: WindowMode,
    zone: Rect,
}

impl EdgeTrigger {
    /// Create a trigger watching `zone`.
    ///
    /// Auto-hide triggers start hidden; pinned triggers start and stay visible.
    pub fn new(zone: Rect, mode: WindowMode) -> Self {
        let state = match mode {
            WindowMode::AutoHide => PanelState::Hidden,
            WindowMode::Pinned => PanelState::Visible,
        };
        Self { state, mode, zone }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Visible
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn zone(&self) -> Rect {
        self.zone
    }

    /// Replace the trigger strip, e.g. after the monitor size changed.
    pub fn set_zone(&mut self, zone: Rect) {
        self.zone = zone;
    }

    /// Feed one pointer sample. `panel` is where the panel is (or would be)
    /// on screen. Returns the transition taken, if any.
    pub fn poll(&mut self, pointer: Position, panel: Rect) -> Option<Transition> {
        if self.mode == WindowMode::Pinned {
            return None;
        }

        match self.state {
            PanelState::Hidden if self.zone.contains(pointer) => {
                self.state = PanelState::Visible;
                Some(Transition::Show)
            }
            // Exit uses the panel rect only, even if it overlaps the zone.
            PanelState::Visible if !panel.contains(pointer) => {
                self.state = PanelState::Hidden;
                Some(Transition::Hide)
            }
            _ => None,
        }
    }
}
