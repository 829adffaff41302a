//! Event dispatch for the tool menu.
//!
//! The menu does not call listeners directly; it emits [`MenuEvent`]s through
//! a [`MenuEvents`] controller and subscribers receive them on `mpsc`
//! channels. Each event carries a set of [`EventKind`] flags and an
//! [`EventFilter`] is a simple OR mask: an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::tools::Tool;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// An attached tool button was clicked.
    pub const TOOL_SELECTED: Self = Self(1 << 0);
    /// A tool item was pulled out of the managed menu group.
    pub const TOOL_DETACHED: Self = Self(1 << 1);
    /// A detached tool item rejoined the managed menu group.
    pub const TOOL_ATTACHED: Self = Self(1 << 2);
    /// The display order changed through a drag move.
    pub const ORDER_CHANGED: Self = Self(1 << 3);
    /// A hardware compatibility filter was applied.
    pub const FILTER_APPLIED: Self = Self(1 << 4);
    /// The menu was cleared because no hardware filter is active.
    pub const MENU_CLEARED: Self = Self(1 << 5);
    /// The menu re-read the user preferences.
    pub const PREFERENCES_READ: Self = Self(1 << 6);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }
        let pairs: &[(EventKind, &str)] = &[
            (EventKind::TOOL_SELECTED, "TOOL_SELECTED"),
            (EventKind::TOOL_DETACHED, "TOOL_DETACHED"),
            (EventKind::TOOL_ATTACHED, "TOOL_ATTACHED"),
            (EventKind::ORDER_CHANGED, "ORDER_CHANGED"),
            (EventKind::FILTER_APPLIED, "FILTER_APPLIED"),
            (EventKind::MENU_CLEARED, "MENU_CLEARED"),
            (EventKind::PREFERENCES_READ, "PREFERENCES_READ"),
        ];
        let mut names = Vec::new();
        let mut known: u32 = 0;
        for (kind, name) in pairs {
            known |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known;
        if extra != 0 {
            names.push(format!("0x{extra:x}"));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MenuEvent
// ─────────────────────────────────────────────────────────────────────────────

/// An event emitted by the tool menu.
#[derive(Debug, Clone)]
pub struct MenuEvent {
    /// Bitflag set of categories this event belongs to.
    pub kinds: EventKind,
    /// Monotonic timestamp, seconds since the controller was created.
    pub timestamp: f64,
    /// Tool the event refers to (selection, detach, attach).
    pub tool: Option<Tool>,
    /// Hardware identity (filter application).
    pub hw_name: Option<String>,
    /// (from, to) indices of a drag move.
    pub moved: Option<(usize, usize)>,
    /// Display order after an order change.
    pub order: Option<Vec<Tool>>,
}

impl MenuEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0, // set by the controller on emit
            tool: None,
            hw_name: None,
            moved: None,
            order: None,
        }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = Some(tool);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &MenuEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MenuEvents – the controller
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<MenuEvent>,
}

struct Inner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

/// Collects and distributes menu events to subscribers.
#[derive(Clone)]
pub struct MenuEvents {
    inner: Arc<Mutex<Inner>>,
}

impl MenuEvents {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<MenuEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to every event.
    pub fn subscribe_all(&self) -> Receiver<MenuEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all subscribers whose filter matches. Subscribers
    /// whose receiving end was dropped are pruned.
    pub fn emit(&self, mut event: MenuEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for MenuEvents {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
