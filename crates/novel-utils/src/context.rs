// File: novel-utils/src/context.rs
// Purpose: Traits over the browsing context plus in-memory implementations

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::RwLock;

/// The current location of the browsing context
pub trait Location {
    /// Full href, e.g. `https://novel.example/#/book/1?from=rank`
    fn href(&self) -> String;
}

/// A location that never changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation {
    href: String,
}

impl StaticLocation {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

impl Location for StaticLocation {
    fn href(&self) -> String {
        self.href.clone()
    }
}

/// The parts of the document the helpers touch
pub trait Document {
    /// Top offset of the element with the given id, if it exists
    fn element_offset_top(&self, id: &str) -> Option<f64>;

    /// Sets the vertical scroll offset of the page
    fn set_scroll_top(&self, offset: f64);

    /// Current vertical scroll offset of the page
    fn scroll_top(&self) -> f64;
}

/// In-memory document: a set of element offsets and a scroll position
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, f64>,
    scroll_top: RwLock<f64>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element at the given top offset
    pub fn with_element(mut self, id: impl Into<String>, offset_top: f64) -> Self {
        self.elements.insert(id.into(), offset_top);
        self
    }
}

impl Document for MemoryDocument {
    fn element_offset_top(&self, id: &str) -> Option<f64> {
        self.elements.get(id).copied()
    }

    fn set_scroll_top(&self, offset: f64) {
        match self.scroll_top.write() {
            Ok(mut top) => *top = offset,
            Err(poisoned) => *poisoned.into_inner() = offset,
        }
    }

    fn scroll_top(&self) -> f64 {
        match self.scroll_top.read() {
            Ok(top) => *top,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Source of the current wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
