use std::fmt;

use super::corner::CornerId;
use super::wall::WallId;

/// Change notification emitted by the plan. Events carry entity ids
/// only; subscribers read derived geometry back through the plan's
/// accessors after the mutation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEvent {
    CornerAdded(CornerId),
    CornerMoved(CornerId),
    CornerRemoved(CornerId),
    WallAdded(WallId),
    WallMoved(WallId),
    WallRemoved(WallId),
    /// Rooms were rebuilt; the renderer's redraw hook.
    RoomsUpdated,
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&PlanEvent)>;

/// Listener registry with explicit unsubscribe handles.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl EventBus {
    /// Registers a listener and returns its subscription handle.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlanEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Removes a listener. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    pub(crate) fn emit(&mut self, event: &PlanEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
