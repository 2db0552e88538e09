//! Group-open configuration.

pub(crate) mod attr;
mod target;

#[cfg(test)]
mod test;

pub use target::*;
