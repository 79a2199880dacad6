//! Window-management core for a browser-hosted desktop shell.
//!
//! The crate owns three cooperating pieces: the focus arbitrator, which
//! reconciles competing focus/raise requests from different input sources;
//! the workspace manager, which tracks the active virtual desktop; and the
//! keyboard-avoidance placement engine, which recomputes window rectangles
//! when a software keyboard obscures them. The surrounding shell renders
//! windows and feeds platform events in; this crate never touches the DOM
//! directly.

pub mod actor;
pub mod common;
pub mod layout_engine;
pub mod model;
pub mod sys;
