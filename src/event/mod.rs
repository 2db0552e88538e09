//! Event namespaces and name resolution.

mod alias;
pub mod hw;
pub mod raw;
mod resolve;
pub mod sw;
pub mod tp;

#[cfg(test)]
mod test;

pub use alias::*;
pub use hw::{Cache, Hardware};
pub use raw::Raw;
pub use resolve::*;
pub use sw::Software;
pub use tp::Tracepoint;

use crate::ffi::bindings as b;

/// Kernel subsystem interpreting the event config (`perf_event_attr::type`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EventType {
    Hardware = b::PERF_TYPE_HARDWARE,
    Software = b::PERF_TYPE_SOFTWARE,
    Tracepoint = b::PERF_TYPE_TRACEPOINT,
    HwCache = b::PERF_TYPE_HW_CACHE,
    Raw = b::PERF_TYPE_RAW,
    Breakpoint = b::PERF_TYPE_BREAKPOINT,
}

/// One event of any namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Hardware(Hardware),
    Software(Software),
    Cache(Cache),
    Raw(Raw),
    Tracepoint(Tracepoint),
}

impl Event {
    pub fn ty(&self) -> EventType {
        match self {
            Event::Hardware(_) => EventType::Hardware,
            Event::Software(_) => EventType::Software,
            Event::Cache(_) => EventType::HwCache,
            Event::Raw(_) => EventType::Raw,
            Event::Tracepoint(_) => EventType::Tracepoint,
        }
    }

    pub fn config(&self) -> u64 {
        match self {
            Event::Hardware(hw) => hw.config(),
            Event::Software(sw) => sw.config(),
            Event::Cache(cache) => cache.config(),
            Event::Raw(raw) => raw.config(),
            Event::Tracepoint(tp) => tp.id,
        }
    }

    /// Whether kernel-mode counts must be included for the event to be useful.
    pub fn requires_kernel(&self) -> bool {
        match self {
            Event::Software(sw) => sw.requires_kernel(),
            _ => false,
        }
    }
}

macro_rules! into_event {
    ($ty:ident) => {
        impl From<$ty> for crate::event::Event {
            fn from(value: $ty) -> Self {
                crate::event::Event::$ty(value)
            }
        }
    };
}
use into_event;

/// A resolved event, ready to be opened.
///
/// Immutable once built: two descriptors resolved from aliases of the same
/// event compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventDescriptor {
    name: String,
    event: Event,
    exclude_kernel: bool,
    exclude_hv: bool,
}

impl EventDescriptor {
    /// Kernel and hypervisor counts are excluded unless the event
    /// [requires kernel mode][Event::requires_kernel].
    pub fn new(name: impl Into<String>, event: impl Into<Event>) -> Self {
        let event = event.into();
        Self {
            name: name.into(),
            exclude_kernel: !event.requires_kernel(),
            exclude_hv: true,
            event,
        }
    }

    /// Name reported alongside the counted value.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn ty(&self) -> EventType {
        self.event.ty()
    }

    pub fn config(&self) -> u64 {
        self.event.config()
    }

    pub fn exclude_kernel(&self) -> bool {
        self.exclude_kernel
    }

    pub fn exclude_hv(&self) -> bool {
        self.exclude_hv
    }
}
