//! Global hotkey adapter for workspace switching.
//!
//! `Ctrl+Alt+ArrowLeft`/`ArrowUp` and `Ctrl+Alt+ArrowRight`/`ArrowDown` cycle
//! through the workspaces in wrapping order (previous and next respectively).
//! The combination is rejected when `Meta` is also held so
//! the binding never collides with OS-level shortcuts. The binder holds no
//! state of its own; it is a listener registered against a generic keydown
//! source (the DOM `window` in production) and must be removed on teardown.

use bitflags::bitflags;
use tracing::trace;

use crate::model::workspace::{SharedWorkspaceManager, WorkspaceId};

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const CONTROL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name to a key this binder cares about.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Anything that can register keydown listeners and later remove them. The
/// production implementation adapts the platform's global event target.
pub trait KeydownSource {
    type Token;

    fn add_keydown_listener(&mut self, listener: Box<dyn FnMut(&KeyInput) + Send>) -> Self::Token;

    fn remove_keydown_listener(&mut self, token: Self::Token);
}

pub struct WorkspaceHotkeys {
    manager: SharedWorkspaceManager,
}

impl WorkspaceHotkeys {
    pub fn new(manager: SharedWorkspaceManager) -> WorkspaceHotkeys {
        WorkspaceHotkeys { manager }
    }

    /// Handles one keydown. Returns the workspace switched to when the input
    /// matched the binding, `None` otherwise.
    pub fn handle_keydown(&self, input: &KeyInput) -> Option<WorkspaceId> {
        if !Self::binding_matches(input.modifiers) {
            return None;
        }
        let mut manager = self.manager.lock();
        let current = manager.state().ws;
        let target = match input.key {
            Key::ArrowLeft | Key::ArrowUp => current.prev(),
            Key::ArrowRight | Key::ArrowDown => current.next(),
        };
        trace!(%current, %target, "workspace hotkey");
        manager.set_ws(target);
        Some(target)
    }

    fn binding_matches(modifiers: Modifiers) -> bool {
        modifiers.contains(Modifiers::CONTROL | Modifiers::ALT)
            && !modifiers.contains(Modifiers::META)
    }
}

/// Registers the workspace hotkey binding on `source`. The returned token must
/// be handed back to [`KeydownSource::remove_keydown_listener`] on teardown;
/// leaking it leaks a global listener.
pub fn bind_workspace_hotkeys<S: KeydownSource>(
    source: &mut S,
    manager: SharedWorkspaceManager,
) -> S::Token {
    let hotkeys = WorkspaceHotkeys::new(manager);
    source.add_keydown_listener(Box::new(move |input| {
        hotkeys.handle_keydown(input);
    }))
}
