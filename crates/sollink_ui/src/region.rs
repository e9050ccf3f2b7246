//! Pointer plumbing for outside-click detection.
//!
//! [`PointerHub`] plays the role of the document: every pointer-down is
//! broadcast to the listeners attached to it. A [`PointerListener`] detaches
//! itself when dropped, so a component that holds one for the length of its
//! mount never leaves a stale listener behind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Anything that can answer "is this point inside me?".
pub trait Region: Send + Sync {
    fn contains(&self, point: Point) -> bool;
}

/// Axis-aligned rectangle; the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Region for Rect {
    fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    senders: HashMap<u64, mpsc::UnboundedSender<Point>>,
}

/// Document-level pointer-down broadcaster.
#[derive(Clone, Default)]
pub struct PointerHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. It stays attached until the returned handle drops.
    pub fn listen(&self) -> PointerListener {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = self.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, tx);
        trace!(listener = id, "pointer listener attached");

        PointerListener {
            id,
            rx,
            hub: self.clone(),
        }
    }

    /// Broadcast a pointer-down. Returns how many listeners received it.
    pub fn pointer_down(&self, point: Point) -> usize {
        let mut listeners = self.listeners.lock();
        listeners
            .senders
            .retain(|_, tx| tx.send(point).is_ok());
        listeners.senders.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().senders.len()
    }

    fn detach(&self, id: u64) {
        if self.listeners.lock().senders.remove(&id).is_some() {
            trace!(listener = id, "pointer listener detached");
        }
    }
}

/// A live subscription to a [`PointerHub`].
pub struct PointerListener {
    id: u64,
    rx: mpsc::UnboundedReceiver<Point>,
    hub: PointerHub,
}

impl PointerListener {
    /// Next pointer-down, in dispatch order.
    pub async fn recv(&mut self) -> Option<Point> {
        self.rx.recv().await
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        self.hub.detach(self.id);
    }
}
