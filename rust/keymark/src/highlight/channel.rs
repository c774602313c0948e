//! HostChannel: Typed Publish/Subscribe between Editor Components
//!
//! The page that extracts keywords and the editor that highlights them are
//! decoupled. Instead of broadcasting untyped window events, the editor host
//! owns one channel and hands it to both sides.

use serde::{Deserialize, Serialize};

// =============================================================================
// Types
// =============================================================================

/// Messages exchanged through the host channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    /// Highlight these keywords; `context` is the text they were extracted from
    HighlightKeywords { keywords: Vec<String>, context: String },
    /// Remember the current document text for later insight requests
    StoreText { text: String },
}

/// Handle returned by [`HostChannel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn Fn(&HostEvent)>;

// =============================================================================
// HostChannel
// =============================================================================

/// Single-threaded event channel. Handlers run synchronously in
/// subscription order.
#[derive(Default)]
pub struct HostChannel {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl HostChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&HostEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Deliver `event` to every handler; returns how many ran
    pub fn publish(&self, event: &HostEvent) -> usize {
        for (_, handler) in &self.handlers {
            handler(event);
        }
        self.handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for HostChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostChannel")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
