use std::io;
use std::os::fd::RawFd;
use std::path::PathBuf;

use thiserror::Error;

use crate::count::State;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No namespace recognizes the event name.
    #[error("cannot find perf event: {0}")]
    UnknownEvent(String),

    /// An `perf_event_open`, `ioctl`, `read` or `close` call failed.
    ///
    /// For `perf_event_open` the fd is the group fd passed to the call.
    #[error("cannot perform {syscall} on fd[{fd}]: {source}")]
    OsCall {
        syscall: &'static str,
        fd: RawFd,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    ProtocolMismatch(#[from] ProtocolMismatch),

    /// `pid == -1 && cpu == -1` was requested.
    #[error("pid -1 and cpu -1 can not be monitored together")]
    InvalidScope,

    #[error("cannot {op} an event group in the {state:?} state")]
    InvalidState { op: &'static str, state: State },

    #[error("event group has no events")]
    EmptyGroup,

    #[error("single value read on a group of {0} events")]
    NotSingleEvent(usize),

    #[error("values buffer holds {got} entries but the group has {needed} events")]
    ValuesTooSmall { needed: usize, got: usize },

    #[error("PMU event {name} has an invalid {field}: {value:?}")]
    InvalidEncoding {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("cannot load PMU events: {0}")]
    PmuDatabase(#[from] serde_json::Error),

    #[error("cannot scan tracepoints under {path:?}: {source}")]
    Tracefs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn os(syscall: &'static str, fd: RawFd, source: io::Error) -> Self {
        Self::OsCall {
            syscall,
            fd,
            source,
        }
    }

    /// OS error code of a failed syscall.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::OsCall { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// The group read buffer does not match what the group expects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolMismatch {
    #[error("read buffer of {bytes} bytes holds no event count")]
    Truncated { bytes: usize },

    #[error("read buffer of {bytes} bytes is not made of 64-bit words")]
    Unaligned { bytes: usize },

    #[error("read {words} words but the buffer reports {nr} events")]
    Length { words: usize, nr: u64 },

    #[error("read buffer reports {nr} events but the group has {expected}")]
    Members { expected: usize, nr: usize },

    #[error("read buffer reports unknown event id {0}")]
    UnknownId(u64),

    #[error("read buffer reports event id {0} twice")]
    DuplicateId(u64),
}
