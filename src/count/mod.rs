//! Counting events as a kernel event group.

pub mod codec;
mod group;


pub use group::*;

/// Lifecycle of an [`EventGroup`].
///
/// ```text
/// Created -> Open -> { Enabled <-> Disabled } -> Closed -> Open ...
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Created,
    Open,
    Enabled,
    Disabled,
    Closed,
}

impl State {
    /// Whether the group holds kernel handles.
    pub fn is_live(&self) -> bool {
        matches!(self, State::Open | State::Enabled | State::Disabled)
    }
}

/// Value counted for one member of a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventCount {
    pub name: String,
    pub value: u64,
}
