//! Edge snapping for dragged windows.
//!
//! Dragging a window close to the left, right, or top viewport edge targets a
//! half-screen layout. The shell shows a preview while the drag is in flight
//! and applies the target frame on release; this module only answers the two
//! geometry questions.

use serde::{Deserialize, Serialize};

use crate::sys::geometry::{Rect, Viewport};

/// Distance in pixels from a viewport edge at which snapping engages.
pub const SNAP_EDGE_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapPosition {
    Left,
    Right,
    Top,
}

/// Snap position for a window currently at `frame`, if any edge qualifies.
/// When several qualify the left edge wins over right, and right over top.
pub fn snap_position_for_drag(frame: &Rect, viewport: Viewport) -> Option<SnapPosition> {
    if frame.left() <= SNAP_EDGE_THRESHOLD {
        Some(SnapPosition::Left)
    } else if frame.right() >= viewport.width - SNAP_EDGE_THRESHOLD {
        Some(SnapPosition::Right)
    } else if frame.top() <= SNAP_EDGE_THRESHOLD {
        Some(SnapPosition::Top)
    } else {
        None
    }
}

/// The frame a window assumes when snapped to `position`.
pub fn snap_target_frame(position: SnapPosition, viewport: Viewport) -> Rect {
    match position {
        SnapPosition::Left => Rect::new(0.0, 0.0, viewport.width / 2.0, viewport.height),
        SnapPosition::Right => {
            Rect::new(viewport.width / 2.0, 0.0, viewport.width / 2.0, viewport.height)
        }
        SnapPosition::Top => Rect::new(0.0, 0.0, viewport.width, viewport.height / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn near_left_edge_targets_left_half() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let position = snap_position_for_drag(&rect(5.0, 150.0, 100.0, 100.0), viewport);
        assert_eq!(position, Some(SnapPosition::Left));
        assert_eq!(
            snap_target_frame(SnapPosition::Left, viewport),
            rect(0.0, 0.0, 960.0, 1080.0)
        );
    }

    #[test]
    fn near_right_edge_targets_right_half() {
        let viewport = Viewport::new(1024.0, 768.0);
        let position = snap_position_for_drag(&rect(910.0, 200.0, 100.0, 100.0), viewport);
        assert_eq!(position, Some(SnapPosition::Right));
        assert_eq!(
            snap_target_frame(SnapPosition::Right, viewport),
            rect(512.0, 0.0, 512.0, 768.0)
        );
    }

    #[test]
    fn near_top_edge_targets_top_half() {
        let viewport = Viewport::new(1280.0, 720.0);
        let position = snap_position_for_drag(&rect(400.0, 5.0, 100.0, 100.0), viewport);
        assert_eq!(position, Some(SnapPosition::Top));
        assert_eq!(
            snap_target_frame(SnapPosition::Top, viewport),
            rect(0.0, 0.0, 1280.0, 360.0)
        );
    }

    #[test]
    fn away_from_edges_does_not_snap() {
        let viewport = Viewport::new(1440.0, 900.0);
        assert_eq!(snap_position_for_drag(&rect(200.0, 200.0, 100.0, 100.0), viewport), None);
    }

    #[test]
    fn left_edge_wins_over_top() {
        let viewport = Viewport::new(1440.0, 900.0);
        let position = snap_position_for_drag(&rect(10.0, 10.0, 100.0, 100.0), viewport);
        assert_eq!(position, Some(SnapPosition::Left));
    }
}
