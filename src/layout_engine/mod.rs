pub mod keyboard_avoidance;
pub mod snapping;

pub use keyboard_avoidance::{
    KEYBOARD_AVOIDANCE_MARGIN, SoftKeyboardFrame, SoftKeyboardMode, WindowPlacement,
    reposition_windows_for_keyboard,
};
pub use snapping::{SNAP_EDGE_THRESHOLD, SnapPosition, snap_position_for_drag, snap_target_frame};
