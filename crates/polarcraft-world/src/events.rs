//! World change notifications.
//!
//! The [`World`](crate::World) owns a registry of listener callbacks and
//! invokes them synchronously while the triggering call is still running.
//! Callbacks only receive `&WorldEvent`, never the world itself, so a
//! listener cannot re-enter a mutating call.
//!
//! Frame-based consumers that prefer polling can attach an [`EventBuffer`],
//! a double-buffered recorder in the style of a per-frame event queue.

use std::cell::RefCell;
use std::rc::Rc;

use crate::block::BlockState;
use crate::light::CellLight;
use crate::position::BlockPosition;

/// Emitted by the world after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// A cell was written. `block` is `None` when the cell became air.
    BlockChanged {
        position: BlockPosition,
        block: Option<BlockState>,
    },
    /// The grid was emptied (and the ground plane re-laid).
    WorldCleared,
    /// Propagation finished; carries every lit cell in position order.
    LightUpdated { snapshot: Vec<CellLight> },
    /// A sensor's activation flipped.
    SensorChanged {
        position: BlockPosition,
        activated: bool,
    },
}

/// Discriminant of a [`WorldEvent`], handy for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorldEventKind {
    BlockChanged,
    WorldCleared,
    LightUpdated,
    SensorChanged,
}

impl WorldEvent {
    pub fn kind(&self) -> WorldEventKind {
        match self {
            WorldEvent::BlockChanged { .. } => WorldEventKind::BlockChanged,
            WorldEvent::WorldCleared => WorldEventKind::WorldCleared,
            WorldEvent::LightUpdated { .. } => WorldEventKind::LightUpdated,
            WorldEvent::SensorChanged { .. } => WorldEventKind::SensorChanged,
        }
    }
}

impl WorldEventKind {
    /// Wire-style name, e.g. `"sensorChanged"`.
    pub fn name(self) -> &'static str {
        match self {
            WorldEventKind::BlockChanged => "blockChanged",
            WorldEventKind::WorldCleared => "worldCleared",
            WorldEventKind::LightUpdated => "lightUpdated",
            WorldEventKind::SensorChanged => "sensorChanged",
        }
    }
}

/// Handle returned by [`World::add_listener`](crate::World::add_listener).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&WorldEvent)>;

/// Ordered callback registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Delivers `event` to every listener in registration order.
    pub(crate) fn emit(&mut self, event: &WorldEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
struct Buffers {
    /// Events from the previous frame (readable).
    prev: Vec<WorldEvent>,
    /// Events from the current frame (being written).
    current: Vec<WorldEvent>,
}

/// Double-buffered event storage shared between the world and a consumer.
///
/// Events written in the current frame are readable in the current and next
/// frame. After two [`swap`](EventBuffer::swap) calls they are dropped.
#[derive(Clone, Default)]
pub struct EventBuffer {
    inner: Rc<RefCell<Buffers>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends every event to this buffer.
    pub fn recorder(&self) -> impl FnMut(&WorldEvent) + 'static {
        let inner = Rc::clone(&self.inner);
        move |event: &WorldEvent| inner.borrow_mut().current.push(event.clone())
    }

    pub fn send(&self, event: WorldEvent) {
        self.inner.borrow_mut().current.push(event);
    }

    /// All readable events (previous + current frame), oldest first.
    pub fn read(&self) -> Vec<WorldEvent> {
        let buffers = self.inner.borrow();
        buffers.prev.iter().chain(buffers.current.iter()).cloned().collect()
    }

    /// Readable events of one kind.
    pub fn read_kind(&self, kind: WorldEventKind) -> Vec<WorldEvent> {
        self.read().into_iter().filter(|e| e.kind() == kind).collect()
    }

    pub fn len(&self) -> usize {
        let buffers = self.inner.borrow();
        buffers.prev.len() + buffers.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances the frame: previous events are dropped, current becomes previous.
    pub fn swap(&self) {
        let mut buffers = self.inner.borrow_mut();
        let buffers = &mut *buffers;
        buffers.prev.clear();
        std::mem::swap(&mut buffers.prev, &mut buffers.current);
    }

    pub fn clear(&self) {
        let mut buffers = self.inner.borrow_mut();
        buffers.prev.clear();
        buffers.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared() -> WorldEvent {
        WorldEvent::WorldCleared
    }

    #[test]
    fn test_listeners_called_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            listeners.add(Box::new(move |_: &WorldEvent| log.borrow_mut().push(tag)));
        }
        listeners.emit(&cleared());
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_listener() {
        let mut listeners = Listeners::default();
        let id = listeners.add(Box::new(|_: &WorldEvent| {}));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_recorder_feeds_buffer() {
        let buffer = EventBuffer::new();
        let mut record = buffer.recorder();
        record(&cleared());
        record(&WorldEvent::SensorChanged {
            position: BlockPosition::new(1, 1, 1),
            activated: true,
        });
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.read_kind(WorldEventKind::SensorChanged).len(), 1);
    }

    #[test]
    fn test_events_cleared_after_two_swaps() {
        let buffer = EventBuffer::new();
        buffer.send(cleared());

        // Frame N: event is readable
        assert_eq!(buffer.len(), 1);

        // Frame N+1: swap, event moves to prev, still readable
        buffer.swap();
        assert_eq!(buffer.len(), 1);

        // Frame N+2: swap, prev is cleared, event is gone
        buffer.swap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(WorldEventKind::BlockChanged.name(), "blockChanged");
        assert_eq!(cleared().kind().name(), "worldCleared");
    }
}
