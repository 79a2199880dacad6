//! Per-workspace raise stacks.
//!
//! Each workspace keeps its window ids in most-recently-raised order. The top
//! of the active stack is the window that should regain focus after a
//! workspace switch or after the focused window closes. Fed by the `raise`
//! channel of the focus arbitrator.

use tracing::trace;

use crate::common::collections::HashMap;
use crate::model::workspace::WorkspaceId;

#[derive(Debug, Default)]
pub struct WorkspaceStacks {
    stacks: HashMap<WorkspaceId, Vec<String>>,
}

impl WorkspaceStacks {
    pub fn new() -> WorkspaceStacks { WorkspaceStacks::default() }

    /// Moves `id` to the top of the workspace's stack, inserting it if it was
    /// not present.
    pub fn raise(&mut self, ws: WorkspaceId, id: &str) {
        let stack = self.stacks.entry(ws).or_default();
        stack.retain(|existing| existing != id);
        stack.push(id.to_owned());
        trace!(%ws, id, "raised window");
    }

    /// Removes `id` from every workspace's stack. Closing a window must not
    /// leave stale entries that a later switch would try to refocus.
    pub fn remove(&mut self, id: &str) {
        for stack in self.stacks.values_mut() {
            stack.retain(|existing| existing != id);
        }
    }

    /// The most recently raised window on the given workspace, if any.
    pub fn top(&self, ws: WorkspaceId) -> Option<&str> {
        self.stacks.get(&ws).and_then(|stack| stack.last()).map(String::as_str)
    }

    /// Ids on the given workspace, bottom to top.
    pub fn stack(&self, ws: WorkspaceId) -> &[String] {
        self.stacks.get(&ws).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, ws: WorkspaceId, id: &str) -> bool {
        self.stack(ws).iter().any(|existing| existing == id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::workspace::WorkspaceId::{Ws1, Ws2};

    #[test]
    fn raise_moves_window_to_top() {
        let mut stacks = WorkspaceStacks::new();
        stacks.raise(Ws1, "terminal");
        stacks.raise(Ws1, "files");
        stacks.raise(Ws1, "terminal");
        assert_eq!(stacks.stack(Ws1), ["files".to_string(), "terminal".to_string()]);
        assert_eq!(stacks.top(Ws1), Some("terminal"));
    }

    #[test]
    fn stacks_are_independent_per_workspace() {
        let mut stacks = WorkspaceStacks::new();
        stacks.raise(Ws1, "terminal");
        stacks.raise(Ws2, "browser");
        assert_eq!(stacks.top(Ws1), Some("terminal"));
        assert_eq!(stacks.top(Ws2), Some("browser"));
        assert!(!stacks.contains(Ws2, "terminal"));
    }

    #[test]
    fn remove_clears_window_from_all_workspaces() {
        let mut stacks = WorkspaceStacks::new();
        stacks.raise(Ws1, "settings");
        stacks.raise(Ws2, "settings");
        stacks.raise(Ws2, "browser");
        stacks.remove("settings");
        assert_eq!(stacks.top(Ws1), None);
        assert_eq!(stacks.top(Ws2), Some("browser"));
    }

    #[test]
    fn top_of_empty_workspace_is_none() {
        let stacks = WorkspaceStacks::new();
        assert_eq!(stacks.top(Ws1), None);
        assert!(stacks.stack(Ws1).is_empty());
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn raise_channel_feeds_the_active_workspace_stack() {
        use std::sync::Arc;
        use std::time::Duration;

        use parking_lot::Mutex;

        use crate::actor::focus_arbitrator::{FocusArbitrator, RaiseRequest};
        use crate::common::config::FocusSettings;
        use crate::model::workspace::WorkspaceManager;

        let manager = WorkspaceManager::new_shared(Ws1);
        let stacks = Arc::new(Mutex::new(WorkspaceStacks::new()));
        let handle = FocusArbitrator::spawn(FocusSettings::default());

        let manager_for_handler = manager.clone();
        let stacks_for_handler = stacks.clone();
        handle.on_raise(move |request| {
            let ws = manager_for_handler.lock().state().ws;
            stacks_for_handler.lock().raise(ws, &request.id);
        });

        handle.raise(RaiseRequest { id: "terminal".to_string() });
        tokio::time::sleep(Duration::from_millis(60)).await;
        manager.lock().set_ws(Ws2);
        handle.raise(RaiseRequest { id: "browser".to_string() });
        tokio::time::sleep(Duration::from_millis(60)).await;

        let stacks = stacks.lock();
        assert_eq!(stacks.top(Ws1), Some("terminal"));
        assert_eq!(stacks.top(Ws2), Some("browser"));
    }
}
