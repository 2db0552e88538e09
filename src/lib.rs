//! Count Linux `perf_event` events in-process, as a kernel event group.
//!
//! ## Example
//!
//! Count instructions and cycles spent in the (inefficient) fibonacci
//! calculation.
//!
//! ```no_run
//! use perf_group::config::{Cpu, Proc};
//! use perf_group::count::EventGroup;
//! use perf_group::event::Resolver;
//!
//! // Generic events, host PMU events and kernel tracepoints.
//! let resolver = Resolver::system();
//! let mut group = EventGroup::from_names(&resolver, "instructions,cycles").unwrap();
//!
//! // Count the current process, all CPUs.
//! group.start((Proc::CURRENT, Cpu::ALL)).unwrap();
//! fn fib(n: usize) -> usize {
//!     match n {
//!         0 => 0,
//!         1 => 1,
//!         n => fib(n - 1) + fib(n - 2),
//!     }
//! }
//! std::hint::black_box(fib(30));
//! group.disable().unwrap();
//!
//! for count in group.read().unwrap() {
//!     println!("{}: {}", count.name, count.value);
//! }
//! group.close().unwrap();
//! ```
//!
//! ## Event names
//!
//! Names are resolved by [`Resolver`][event::Resolver], trying in order:
//!
//! - generic hardware events (`cycles`, `instructions`, ...),
//! - generic software events (`cpu-clock`, `context-switches`, ...),
//! - generic hardware cache events (`L1-dcache-load-misses`, ...),
//! - raw events of a [PMU database][pmu::PmuDatabase] (`CPU_CLK_UNHALTED.THREAD_P`),
//! - kernel tracepoints (`sched:sched_switch`).
//!
//! Counting needs `perf_event_open` permission, see
//! `/proc/sys/kernel/perf_event_paranoid`.

pub mod config;
pub mod count;
pub mod error;
pub mod event;
mod ffi;
pub mod pmu;
pub mod sys;

pub use error::{Error, Result};
