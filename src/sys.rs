//! The syscall gateway.
//!
//! [`EventGroup`][crate::count::EventGroup] never talks to the kernel directly,
//! every call goes through a [`PerfSys`] implementation. [`Kernel`] is the real
//! one; tests plug in recording doubles.

use std::os::fd::RawFd;

pub use crate::ffi::Attr;
use crate::error::{Error, Result};
use crate::ffi::bindings as b;
use crate::ffi::syscall::{close, ioctl, ioctl_argp, perf_event_open, read};

/// Argument-less control operations on a perf event fd.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Enable,
    Disable,
    Reset,
}

impl Control {
    pub(crate) fn as_op(&self) -> u64 {
        match self {
            Control::Enable => b::PERF_EVENT_IOC_ENABLE,
            Control::Disable => b::PERF_EVENT_IOC_DISABLE,
            Control::Reset => b::PERF_EVENT_IOC_RESET,
        }
    }
}

/// Primitive perf operations.
///
/// Implementations hold no business logic: they issue the call and turn the
/// failure sentinel into [`Error::OsCall`].
pub trait PerfSys {
    fn open(&mut self, attr: &Attr, pid: i32, cpu: i32, group_fd: RawFd, flags: u64)
        -> Result<RawFd>;

    fn control(&mut self, fd: RawFd, op: Control) -> Result<()>;

    /// Kernel-assigned event id (`PERF_EVENT_IOC_ID`).
    fn id(&mut self, fd: RawFd) -> Result<u64>;

    /// Returns the number of bytes read.
    fn read(&mut self, fd: RawFd, buf: &mut [u8]) -> Result<usize>;

    fn close(&mut self, fd: RawFd) -> Result<()>;
}

/// Issues real syscalls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Kernel;

impl PerfSys for Kernel {
    fn open(
        &mut self,
        attr: &Attr,
        pid: i32,
        cpu: i32,
        group_fd: RawFd,
        flags: u64,
    ) -> Result<RawFd> {
        perf_event_open(attr, pid, cpu, group_fd, flags)
            .map_err(|e| Error::os("perf_event_open", group_fd, e))
    }

    fn control(&mut self, fd: RawFd, op: Control) -> Result<()> {
        ioctl(fd, op.as_op()).map_err(|e| Error::os("ioctl", fd, e))?;
        Ok(())
    }

    fn id(&mut self, fd: RawFd) -> Result<u64> {
        let mut id = 0u64;
        ioctl_argp(fd, b::PERF_EVENT_IOC_ID, &mut id).map_err(|e| Error::os("ioctl", fd, e))?;
        Ok(id)
    }

    fn read(&mut self, fd: RawFd, buf: &mut [u8]) -> Result<usize> {
        read(fd, buf).map_err(|e| Error::os("read", fd, e))
    }

    fn close(&mut self, fd: RawFd) -> Result<()> {
        close(fd).map_err(|e| Error::os("close", fd, e))
    }
}
