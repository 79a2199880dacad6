//! The focus arbitrator is the single decision point for which window holds
//! input focus and which window should be raised.
//!
//! It reconciles competing requests from different input sources: a mouse
//! click and a simultaneously firing keyboard-navigation focus event must not
//! both win, so keyboard-sourced requests are dropped for a short guard
//! interval after pointer activity. Accepted requests are coalesced with a
//! trailing-edge debounce per channel so rapid programmatic focus churn does
//! not flood subscribers with intermediate states.

use std::future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{self, Instant};
use tracing::trace;

use crate::common::config::FocusSettings;

/// Where a focus attempt originated. Unrecognized sources deserialize as
/// [`FocusSource::Other`]; the arbitrator performs no further validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusSource {
    Mouse,
    Keyboard,
    Other,
}

impl<'de> Deserialize<'de> for FocusSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let source = String::deserialize(deserializer)?;
        Ok(match source.as_str() {
            "mouse" => FocusSource::Mouse,
            "keyboard" => FocusSource::Keyboard,
            _ => FocusSource::Other,
        })
    }
}

/// A single attempt to move input focus to window `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRequest {
    pub id: String,
    pub source: FocusSource,
}

/// A request to bring window `id` to the top of the z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseRequest {
    pub id: String,
}

pub type FocusHandler = Box<dyn FnMut(&FocusRequest) + Send>;
pub type RaiseHandler = Box<dyn FnMut(&RaiseRequest) + Send>;

/// Identifies a subscription on one channel; pass it back to the matching
/// `off_*` call to unsubscribe. Unsubscribing twice is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

enum Request {
    Focus(FocusRequest),
    Raise(RaiseRequest),
    SubscribeFocus(HandlerId, FocusHandler),
    UnsubscribeFocus(HandlerId),
    SubscribeRaise(HandlerId, RaiseHandler),
    UnsubscribeRaise(HandlerId),
}

/// Cloneable handle to a spawned [`FocusArbitrator`]. All methods are
/// non-blocking; requests are processed in submission order by the actor.
#[derive(Clone)]
pub struct FocusArbitratorHandle {
    tx: UnboundedSender<Request>,
    next_handler: Arc<AtomicU64>,
}

impl FocusArbitratorHandle {
    /// Submits a focus attempt. Keyboard-sourced attempts inside the click
    /// guard interval are discarded silently; everything else is scheduled
    /// for debounced delivery on the `focus` channel.
    pub fn focus(&self, request: FocusRequest) {
        let _ = self.tx.send(Request::Focus(request));
    }

    /// Submits a raise attempt; always accepted and debounced on the `raise`
    /// channel.
    pub fn raise(&self, request: RaiseRequest) {
        let _ = self.tx.send(Request::Raise(request));
    }

    pub fn on_focus(&self, handler: impl FnMut(&FocusRequest) + Send + 'static) -> HandlerId {
        let id = self.next_handler_id();
        let _ = self.tx.send(Request::SubscribeFocus(id, Box::new(handler)));
        id
    }

    pub fn off_focus(&self, id: HandlerId) {
        let _ = self.tx.send(Request::UnsubscribeFocus(id));
    }

    pub fn on_raise(&self, handler: impl FnMut(&RaiseRequest) + Send + 'static) -> HandlerId {
        let id = self.next_handler_id();
        let _ = self.tx.send(Request::SubscribeRaise(id, Box::new(handler)));
        id
    }

    pub fn off_raise(&self, id: HandlerId) {
        let _ = self.tx.send(Request::UnsubscribeRaise(id));
    }

    fn next_handler_id(&self) -> HandlerId {
        HandlerId(self.next_handler.fetch_add(1, Ordering::Relaxed))
    }
}

struct Pending<T> {
    payload: T,
    deadline: Instant,
}

pub struct FocusArbitrator {
    settings: FocusSettings,
    focus_handlers: Vec<(HandlerId, FocusHandler)>,
    raise_handlers: Vec<(HandlerId, RaiseHandler)>,
    last_mouse_focus: Option<Instant>,
    pending_focus: Option<Pending<FocusRequest>>,
    pending_raise: Option<Pending<RaiseRequest>>,
}

impl FocusArbitrator {
    /// Spawns the arbitrator on the current runtime and returns its handle.
    /// The actor exits when the last handle is dropped.
    pub fn spawn(settings: FocusSettings) -> FocusArbitratorHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = FocusArbitrator {
            settings,
            focus_handlers: Vec::new(),
            raise_handlers: Vec::new(),
            last_mouse_focus: None,
            pending_focus: None,
            pending_raise: None,
        };
        tokio::spawn(actor.run(rx));
        FocusArbitratorHandle {
            tx,
            next_handler: Arc::new(AtomicU64::new(0)),
        }
    }

    async fn run(mut self, mut rx: UnboundedReceiver<Request>) {
        loop {
            tokio::select! {
                request = rx.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                _ = deadline(self.pending_focus.as_ref().map(|p| p.deadline)) => {
                    self.flush_focus();
                }
                _ = deadline(self.pending_raise.as_ref().map(|p| p.deadline)) => {
                    self.flush_raise();
                }
            }
        }
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::Focus(request) => self.submit_focus(request),
            Request::Raise(request) => {
                trace!(id = %request.id, "raise scheduled");
                self.pending_raise = Some(Pending {
                    payload: request,
                    deadline: Instant::now() + self.settings.debounce(),
                });
            }
            Request::SubscribeFocus(id, handler) => self.focus_handlers.push((id, handler)),
            Request::UnsubscribeFocus(id) => {
                self.focus_handlers.retain(|(existing, _)| *existing != id)
            }
            Request::SubscribeRaise(id, handler) => self.raise_handlers.push((id, handler)),
            Request::UnsubscribeRaise(id) => {
                self.raise_handlers.retain(|(existing, _)| *existing != id)
            }
        }
    }

    fn submit_focus(&mut self, request: FocusRequest) {
        let now = Instant::now();
        match request.source {
            FocusSource::Keyboard => {
                // Mouse intent stays authoritative for the guard interval:
                // the request is dropped outright, never queued or delayed.
                if let Some(last) = self.last_mouse_focus
                    && now.duration_since(last) < self.settings.click_guard()
                {
                    trace!(id = %request.id, "keyboard focus suppressed by click guard");
                    return;
                }
            }
            FocusSource::Mouse => self.last_mouse_focus = Some(now),
            FocusSource::Other => {}
        }
        trace!(id = %request.id, source = ?request.source, "focus scheduled");
        // Single-slot pending timer: a new request replaces the payload and
        // pushes the deadline out, so only the last call in a burst survives.
        self.pending_focus = Some(Pending {
            payload: request,
            deadline: now + self.settings.debounce(),
        });
    }

    fn flush_focus(&mut self) {
        if let Some(pending) = self.pending_focus.take() {
            trace!(id = %pending.payload.id, "focus emitted");
            for (_, handler) in self.focus_handlers.iter_mut() {
                handler(&pending.payload);
            }
        }
    }

    fn flush_raise(&mut self) {
        if let Some(pending) = self.pending_raise.take() {
            trace!(id = %pending.payload.id, "raise emitted");
            for (_, handler) in self.raise_handlers.iter_mut() {
                handler(&pending.payload);
            }
        }
    }
}

async fn deadline(at: Option<Instant>) {
    match at {
        Some(at) => time::sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}
