//! The workspace manager holds the single source of truth for which virtual
//! desktop is active. In-process subscribers are notified synchronously from
//! `set_ws`; consumers outside the subscription graph (independently mounted
//! UI trees) are reached through an injected broadcast port that the
//! production shell wires to a DOM CustomEvent.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, trace};

/// Event name the production broadcast adapter dispatches on the global
/// target. The core itself never touches the DOM.
pub const WORKSPACE_CHANGE_EVENT: &str = "desktop:workspace-change";

/// The fixed set of virtual desktops. The set is immutable for the process
/// lifetime; exactly one workspace is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum WorkspaceId {
    #[serde(rename = "ws_1")]
    #[strum(serialize = "ws_1")]
    Ws1,
    #[serde(rename = "ws_2")]
    #[strum(serialize = "ws_2")]
    Ws2,
    #[serde(rename = "ws_3")]
    #[strum(serialize = "ws_3")]
    Ws3,
    #[serde(rename = "ws_4")]
    #[strum(serialize = "ws_4")]
    Ws4,
}

impl WorkspaceId {
    pub const ALL: [WorkspaceId; 4] = [
        WorkspaceId::Ws1,
        WorkspaceId::Ws2,
        WorkspaceId::Ws3,
        WorkspaceId::Ws4,
    ];

    pub fn first() -> WorkspaceId { WorkspaceId::ALL[0] }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&ws| ws == self).unwrap_or(0)
    }

    /// Next workspace in cyclic order, wrapping from the last to the first.
    pub fn next(self) -> WorkspaceId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous workspace in cyclic order, wrapping from the first to the last.
    pub fn prev(self) -> WorkspaceId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub ws: WorkspaceId,
}

/// Token returned by [`WorkspaceManager::subscribe`]; passing it back to
/// `unsubscribe` removes the listener. Unsubscribing twice is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerToken(u64);

type Listener = Box<dyn FnMut(&WorkspaceState) + Send>;
type BroadcastFn = Box<dyn FnMut(WorkspaceId) + Send>;

pub struct WorkspaceManager {
    state: WorkspaceState,
    listeners: Vec<(ListenerToken, Listener)>,
    next_token: u64,
    broadcast: Option<BroadcastFn>,
}

/// Shared handle for composition roots that hand the manager to several
/// collaborators (hotkey binder, shell adapters).
pub type SharedWorkspaceManager = Arc<Mutex<WorkspaceManager>>;

impl WorkspaceManager {
    pub fn new(initial: WorkspaceId) -> WorkspaceManager {
        WorkspaceManager {
            state: WorkspaceState { ws: initial },
            listeners: Vec::new(),
            next_token: 0,
            broadcast: None,
        }
    }

    pub fn new_shared(initial: WorkspaceId) -> SharedWorkspaceManager {
        Arc::new(Mutex::new(WorkspaceManager::new(initial)))
    }

    /// Installs the external broadcast port. The production adapter dispatches
    /// a [`WORKSPACE_CHANGE_EVENT`] CustomEvent carrying the new id.
    pub fn set_broadcast(&mut self, broadcast: BroadcastFn) {
        self.broadcast = Some(broadcast);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> WorkspaceState { self.state }

    /// Transitions the active workspace. Setting the current value is an
    /// idempotent no-op: nothing is notified, nothing is broadcast. Otherwise
    /// every subscriber runs synchronously with the new state before the
    /// broadcast port fires.
    pub fn set_ws(&mut self, ws: WorkspaceId) {
        if ws == self.state.ws {
            trace!(%ws, "workspace unchanged");
            return;
        }
        debug!(prev = %self.state.ws, next = %ws, "workspace switch");
        self.state = WorkspaceState { ws };
        let state = self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
        if let Some(broadcast) = self.broadcast.as_mut() {
            broadcast(ws);
        }
    }

    /// Registers a listener, invoked on every workspace change in
    /// subscription order.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.listeners.push((token, listener));
        token
    }

    pub fn unsubscribe(&mut self, token: ListenerToken) {
        self.listeners.retain(|(t, _)| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;

    fn recording_manager() -> (WorkspaceManager, Arc<Mutex<Vec<String>>>) {
        let mut manager = WorkspaceManager::new(WorkspaceId::Ws1);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        manager.subscribe(Box::new(move |state| {
            sink.lock().push(format!("listener:{}", state.ws));
        }));
        (manager, log)
    }

    #[test]
    fn cyclic_order_wraps_both_directions() {
        assert_eq!(WorkspaceId::Ws1.prev(), WorkspaceId::Ws4);
        assert_eq!(WorkspaceId::Ws4.next(), WorkspaceId::Ws1);
        assert_eq!(WorkspaceId::Ws2.next(), WorkspaceId::Ws3);
        assert_eq!(WorkspaceId::Ws3.prev(), WorkspaceId::Ws2);
    }

    #[test]
    fn set_ws_to_current_value_is_silent() {
        let (mut manager, log) = recording_manager();
        manager.set_ws(WorkspaceId::Ws1);
        assert!(log.lock().is_empty());
        assert_eq!(manager.state().ws, WorkspaceId::Ws1);
    }

    #[test]
    fn set_ws_notifies_every_subscriber_exactly_once() {
        let (mut manager, log) = recording_manager();
        let sink = log.clone();
        manager.subscribe(Box::new(move |state| {
            sink.lock().push(format!("second:{}", state.ws));
        }));

        manager.set_ws(WorkspaceId::Ws3);
        assert_eq!(
            *log.lock(),
            vec!["listener:ws_3".to_string(), "second:ws_3".to_string()]
        );
    }

    #[test]
    fn broadcast_runs_after_all_subscribers() {
        let (mut manager, log) = recording_manager();
        let sink = log.clone();
        manager.set_broadcast(Box::new(move |ws| {
            sink.lock().push(format!("broadcast:{ws}"));
        }));

        manager.set_ws(WorkspaceId::Ws2);
        assert_eq!(
            *log.lock(),
            vec!["listener:ws_2".to_string(), "broadcast:ws_2".to_string()]
        );
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut manager = WorkspaceManager::new(WorkspaceId::Ws1);
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = log.clone();
        let token = manager.subscribe(Box::new(move |state| {
            sink.lock().push(state.ws.to_string());
        }));

        manager.unsubscribe(token);
        manager.unsubscribe(token);
        manager.set_ws(WorkspaceId::Ws4);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn workspace_id_serializes_with_wire_names() {
        let value = serde_json::to_value(WorkspaceId::Ws2).unwrap();
        assert_eq!(value, serde_json::json!("ws_2"));
        let parsed: WorkspaceId = serde_json::from_value(serde_json::json!("ws_4")).unwrap();
        assert_eq!(parsed, WorkspaceId::Ws4);
    }
}
