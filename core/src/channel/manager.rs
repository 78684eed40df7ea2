use super::{ChannelEvent, Connectivity, EventKind};
use crate::prelude::Transport;
use log::{debug, info, warn};

/// Identifies one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

type Handler<C> = Box<dyn FnMut(&mut C, &ChannelEvent) + Send>;

struct Listener<C> {
    handle: SubscriptionHandle,
    kind: EventKind,
    handler: Handler<C>,
}

/// Owns the push channel, its listener registrations and the connectivity status.
///
/// Handlers receive a caller-owned context `C` on every delivery, so state the
/// caller owns can be updated without shared ownership. Dropping the manager
/// detaches every listener and closes the transport.
pub struct ConnectionManager<T: Transport, C> {
    transport: T,
    status: Connectivity,
    listeners: Vec<Listener<C>>,
    next_handle: u64,
}

impl<T: Transport, C> ConnectionManager<T, C> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            status: Connectivity::Disconnected,
            listeners: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionHandle
    where
        F: FnMut(&mut C, &ChannelEvent) + Send + 'static,
    {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push(Listener {
            handle,
            kind,
            handler: Box::new(handler),
        });
        debug!("listener {:?} attached to {}", handle, kind.name());
        handle
    }

    /// Returns `false` when the handle was not registered.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.handle != handle);
        before != self.listeners.len()
    }

    /// Opens the channel unless it is already open.
    pub fn connect(&mut self) {
        if self.transport.is_open() {
            return;
        }
        if let Err(err) = self.transport.open() {
            warn!("channel open failed: {}", err);
        }
    }

    /// Closes the channel if it is open.
    pub fn disconnect(&mut self) {
        if !self.transport.is_open() {
            return;
        }
        self.transport.close();
        self.status = Connectivity::Disconnected;
        info!("channel closed");
    }

    /// Applies a channel event to the status and hands it to matching listeners.
    ///
    /// Events that arrive after the channel was closed are dropped.
    pub fn deliver(&mut self, ctx: &mut C, event: ChannelEvent) {
        if !self.transport.is_open() {
            debug!("dropping {} on closed channel", event.kind().name());
            return;
        }
        match event {
            ChannelEvent::Connect => {
                self.status = Connectivity::Connected;
                info!("channel connected");
            }
            ChannelEvent::Disconnect => {
                self.status = Connectivity::Disconnected;
                info!("channel disconnected");
            }
            ChannelEvent::LeaderboardUpdate(_) => {}
        }

        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.handler)(ctx, &event);
        }
    }

    pub fn status(&self) -> Connectivity {
        self.status
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Releases listeners and the channel; same as dropping the manager.
    pub fn unmount(self) {}

    fn release(&mut self) {
        let detached = self.listeners.len();
        self.listeners.clear();
        self.disconnect();
        debug!("released channel, detached {} listeners", detached);
    }
}

impl<T: Transport, C> Drop for ConnectionManager<T, C> {
    fn drop(&mut self) {
        self.release();
    }
}
