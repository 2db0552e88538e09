use std::collections::HashMap;
use std::mem;
use std::os::fd::RawFd;

use log::{debug, trace, warn};

use super::codec::{self, IdValue};
use super::{EventCount, State};
use crate::config::attr::from;
use crate::config::Target;
use crate::error::{Error, ProtocolMismatch, Result};
use crate::event::{EventDescriptor, Resolver};
use crate::ffi::bindings as b;
use crate::sys::{Control, Kernel, PerfSys};

/// A kernel fd of one group member and the id the kernel tags its counts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle {
    fd: RawFd,
    id: u64,
}

impl Handle {
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Event group.
///
/// An event group is scheduled onto the CPU as a unit: it will be put onto
/// the CPU only if all of the events in the group can be put onto the CPU.
/// Every member counts the same set of executed instructions, so their
/// values can be meaningfully compared and divided.
///
/// The first event is the group leader. All members are read at once
/// through the leader, results come back in the order the events were given.
///
/// # Examples
///
/// ```no_run
/// use perf_group::config::{Cpu, Proc};
/// use perf_group::count::EventGroup;
/// use perf_group::event::Resolver;
///
/// let resolver = Resolver::new();
/// let mut group = EventGroup::from_names(&resolver, "instructions,cycles").unwrap();
///
/// group.start((Proc::CURRENT, Cpu::ALL)).unwrap();
/// std::hint::black_box((0..1000).sum::<u64>());
/// group.disable().unwrap();
///
/// let counts = group.read().unwrap();
/// println!("IPC: {}", counts[0].value as f64 / counts[1].value as f64);
///
/// group.close().unwrap();
/// ```
pub struct EventGroup<S: PerfSys = Kernel> {
    events: Vec<EventDescriptor>,
    handles: Vec<Handle>,
    // Kernel id -> index into `events`, rebuilt on every open.
    index: HashMap<u64, usize>,
    seen: Vec<bool>,
    read_buf: Vec<u8>,
    state: State,
    sys: S,
}

impl EventGroup<Kernel> {
    pub fn new(events: Vec<EventDescriptor>) -> Self {
        Self::with_sys(events, Kernel)
    }

    /// Resolves a comma-separated list of event names into a group.
    pub fn from_names(resolver: &Resolver, names: &str) -> Result<Self> {
        Ok(Self::new(resolver.resolve_list(names)?))
    }
}

impl<S: PerfSys> EventGroup<S> {
    /// A group issuing its calls through `sys`.
    pub fn with_sys(events: Vec<EventDescriptor>, sys: S) -> Self {
        Self {
            events,
            handles: vec![],
            index: HashMap::new(),
            seen: vec![],
            read_buf: vec![],
            state: State::Created,
            sys,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn events(&self) -> &[EventDescriptor] {
        &self.events
    }

    /// Live handles in group order, empty unless the group is open.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn sys(&self) -> &S {
        &self.sys
    }

    pub fn sys_mut(&mut self) -> &mut S {
        &mut self.sys
    }

    /// Opens every event, the first one as the group leader.
    ///
    /// Valid on a created or closed group. A `(-1, -1)` target fails with
    /// [`Error::InvalidScope`] before any syscall. If any member fails to open,
    /// the members opened so far are closed and the group keeps its state.
    pub fn open(&mut self, target: impl Into<Target>) -> Result<()> {
        if !matches!(self.state, State::Created | State::Closed) {
            return Err(self.invalid("open"));
        }
        let target = Target::check(target.into())?;
        if self.events.is_empty() {
            return Err(Error::EmptyGroup);
        }

        let mut handles: Vec<Handle> = Vec::with_capacity(self.events.len());
        for desc in &self.events {
            let group_fd = handles.first().map(|leader| leader.fd).unwrap_or(-1);
            match open_member(&mut self.sys, desc, target, group_fd) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    for handle in handles.iter().rev() {
                        if let Err(e) = self.sys.close(handle.fd) {
                            warn!("{}", e);
                        }
                    }
                    return Err(e);
                }
            }
        }

        let n = handles.len();
        self.index = handles
            .iter()
            .enumerate()
            .map(|(i, handle)| (handle.id, i))
            .collect();
        self.seen = vec![false; n];
        self.read_buf = vec![0; codec::read_buf_size(n)];
        self.handles = handles;
        self.transit(State::Open);

        Ok(())
    }

    /// Zeroes every member count.
    pub fn reset(&mut self) -> Result<()> {
        self.control("reset", Control::Reset)
    }

    pub fn enable(&mut self) -> Result<()> {
        self.control("enable", Control::Enable)?;
        self.transit(State::Enabled);
        Ok(())
    }

    pub fn disable(&mut self) -> Result<()> {
        self.control("disable", Control::Disable)?;
        self.transit(State::Disabled);
        Ok(())
    }

    /// Counts of every member, in group order.
    pub fn read(&mut self) -> Result<Vec<EventCount>> {
        let mut values = vec![0; self.events.len()];
        self.read_into(&mut values)?;

        let counts = self
            .events
            .iter()
            .zip(values)
            .map(|(desc, value)| EventCount {
                name: desc.name().to_string(),
                value,
            })
            .collect();
        Ok(counts)
    }

    /// Count of a single-event group.
    pub fn read_value(&mut self) -> Result<u64> {
        if self.events.len() != 1 {
            return Err(Error::NotSingleEvent(self.events.len()));
        }
        let mut value = [0];
        self.read_into(&mut value)?;
        Ok(value[0])
    }

    /// Writes the count of member `i` into `values[i]` without allocating.
    pub fn read_into(&mut self, values: &mut [u64]) -> Result<()> {
        if !self.state.is_live() {
            return Err(self.invalid("read"));
        }
        let n = self.handles.len();
        if values.len() < n {
            return Err(Error::ValuesTooSmall {
                needed: n,
                got: values.len(),
            });
        }

        let leader = self.handles[0].fd;
        let bytes = self.sys.read(leader, &mut self.read_buf)?;
        trace!("read {} bytes from fd {}", bytes, leader);

        let buf = &self.read_buf[..bytes.min(self.read_buf.len())];
        let pairs = codec::pairs(buf)?;
        if pairs.len() != n {
            return Err(ProtocolMismatch::Members {
                expected: n,
                nr: pairs.len(),
            }
            .into());
        }

        self.seen.fill(false);
        for IdValue { id, value } in pairs {
            let &i = self
                .index
                .get(&id)
                .ok_or(ProtocolMismatch::UnknownId(id))?;
            if mem::replace(&mut self.seen[i], true) {
                return Err(ProtocolMismatch::DuplicateId(id).into());
            }
            values[i] = value;
        }

        Ok(())
    }

    /// Closes every handle.
    ///
    /// All handles are closed even if some fail, the first failure is
    /// returned. The group ends up closed either way and can be opened again.
    pub fn close(&mut self) -> Result<()> {
        if !self.state.is_live() {
            return Err(self.invalid("close"));
        }

        let mut result = Ok(());
        for handle in mem::take(&mut self.handles) {
            trace!("close fd {}", handle.fd);
            if let Err(e) = self.sys.close(handle.fd) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        self.index.clear();
        self.transit(State::Closed);

        result
    }

    /// Opens, resets and enables the group.
    pub fn start(&mut self, target: impl Into<Target>) -> Result<()> {
        self.open(target)?;
        self.reset()?;
        self.enable()
    }

    /// Disables and closes the group.
    pub fn shutdown(&mut self) -> Result<()> {
        self.disable()?;
        self.close()
    }

    fn control(&mut self, op: &'static str, control: Control) -> Result<()> {
        if !self.state.is_live() {
            return Err(self.invalid(op));
        }
        for handle in &self.handles {
            trace!("ioctl {:?} on fd {}", control, handle.fd);
            self.sys.control(handle.fd, control)?;
        }
        Ok(())
    }

    fn transit(&mut self, state: State) {
        if self.state != state {
            debug!(
                "event group of {} events: {:?} -> {:?}",
                self.events.len(),
                self.state,
                state
            );
        }
        self.state = state;
    }

    fn invalid(&self, op: &'static str) -> Error {
        Error::InvalidState {
            op,
            state: self.state,
        }
    }
}

impl<S: PerfSys> Drop for EventGroup<S> {
    fn drop(&mut self) {
        for handle in mem::take(&mut self.handles) {
            if let Err(e) = self.sys.close(handle.fd) {
                warn!("{}", e);
            }
        }
    }
}

fn open_member<S>(sys: &mut S, desc: &EventDescriptor, target: Target, group_fd: RawFd) -> Result<Handle>
where
    S: PerfSys,
{
    let attr = from(desc);
    let fd = sys.open(
        &attr,
        target.pid(),
        target.cpu(),
        group_fd,
        b::PERF_FLAG_FD_CLOEXEC,
    )?;
    let id = match sys.id(fd) {
        Ok(id) => id,
        Err(e) => {
            if let Err(e) = sys.close(fd) {
                warn!("{}", e);
            }
            return Err(e);
        }
    };
    trace!(
        "perf_event_open {} (type {}, config {:#x}) pid {} cpu {} group fd {}: fd {} id {}",
        desc.name(),
        attr.type_,
        attr.config,
        target.pid(),
        target.cpu(),
        group_fd,
        fd,
        id
    );

    Ok(Handle { fd, id })
}
