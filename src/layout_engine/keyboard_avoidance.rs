//! Keyboard-avoidance placement.
//!
//! When the platform reports a software keyboard, windows that it obscures
//! are moved by the cheapest axis: a docked keyboard spans the full viewport
//! width at the bottom, so only vertical clearance can help; a floating
//! keyboard is a partial-width overlay the user can drag, so a sideways dodge
//! keeps the window's reading position. The function is pure and never
//! mutates its inputs; the shell applies the returned rectangles.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::sys::geometry::{Rect, Viewport};

/// Minimum gap in pixels kept between a window edge and the keyboard.
pub const KEYBOARD_AVOIDANCE_MARGIN: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftKeyboardMode {
    Docked,
    Floating,
}

/// The platform-reported virtual keyboard geometry. Absent entirely when no
/// keyboard is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftKeyboardFrame {
    pub mode: SoftKeyboardMode,
    pub rect: Rect,
}

/// A window's screen rectangle, owned by the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WindowPlacement {
    pub fn rect(&self) -> Rect { Rect::new(self.x, self.y, self.width, self.height) }
}

/// Computes adjusted placements so that no window overlaps the keyboard.
///
/// Windows keep their index, id, and dimensions; only `x`/`y` move, and only
/// for windows that actually intersect the keyboard rect. Results are not
/// clamped to the viewport: a window may be pushed past an edge when the
/// keyboard leaves no room (logged at trace level, behavior intentionally
/// unspecified beyond keyboard clearance).
pub fn reposition_windows_for_keyboard(
    windows: &[WindowPlacement],
    keyboard: Option<&SoftKeyboardFrame>,
    viewport: Viewport,
) -> Vec<WindowPlacement> {
    let Some(keyboard) = keyboard else {
        return windows.to_vec();
    };

    windows
        .iter()
        .map(|window| {
            if !window.rect().intersects(&keyboard.rect) {
                return window.clone();
            }
            let adjusted = match keyboard.mode {
                SoftKeyboardMode::Docked => avoid_docked(window, &keyboard.rect),
                SoftKeyboardMode::Floating => avoid_floating(window, &keyboard.rect),
            };
            if !viewport.contains(&adjusted.rect()) {
                trace!(
                    id = %adjusted.id,
                    x = adjusted.x,
                    y = adjusted.y,
                    "keyboard avoidance pushed window outside the viewport"
                );
            }
            adjusted
        })
        .collect()
}

/// Docked keyboards only leave room above: lift the window until its bottom
/// edge clears the keyboard top by the margin.
fn avoid_docked(window: &WindowPlacement, keyboard: &Rect) -> WindowPlacement {
    let y = keyboard.top() - KEYBOARD_AVOIDANCE_MARGIN - window.height;
    WindowPlacement { y, ..window.clone() }
}

/// Floating keyboards can be dodged sideways; pick whichever direction moves
/// the window less, preferring right on a tie.
fn avoid_floating(window: &WindowPlacement, keyboard: &Rect) -> WindowPlacement {
    let left_x = keyboard.left() - KEYBOARD_AVOIDANCE_MARGIN - window.width;
    let right_x = keyboard.right() + KEYBOARD_AVOIDANCE_MARGIN;
    let left_displacement = window.x - left_x;
    let right_displacement = right_x - window.x;
    let x = if left_displacement < right_displacement { left_x } else { right_x };
    WindowPlacement { x, ..window.clone() }
}
