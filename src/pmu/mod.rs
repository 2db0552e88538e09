//! PMU event databases.
//!
//! A database maps microarchitecture-specific event names (as published in
//! the Intel perfmon JSON files) to their event select and unit mask.

mod cpuid;
#[cfg(target_arch = "x86_64")]
mod host;

#[cfg(test)]
mod test;

use std::collections::BTreeMap;
use std::io::Read;

pub use cpuid::CpuId;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::event::Raw;

/// One perfmon event record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PmuEvent {
    pub event_name: String,
    #[serde(default)]
    pub event_code: String,
    #[serde(rename = "UMask", default)]
    pub umask: String,
    /// Counters usable with the event, e.g. `0,1,2,3`.
    #[serde(default)]
    pub counter: String,
    pub brief_description: Option<String>,
    pub public_description: Option<String>,
    pub sample_after_value: Option<String>,
    #[serde(rename = "CounterHTOff")]
    pub counter_ht_off: Option<String>,
}

impl PmuEvent {
    /// Decodes the event code and unit mask.
    pub fn raw(&self) -> Result<Raw> {
        let decode = |field: &'static str, value: &str| {
            decode_int(value).ok_or_else(|| Error::InvalidEncoding {
                name: self.event_name.clone(),
                field,
                value: value.to_string(),
            })
        };
        Ok(Raw {
            event_code: decode("event code", &self.event_code)?,
            umask: decode("umask", &self.umask)?,
        })
    }
}

/// Parses `0x`/`0X`/`#` prefixed hexadecimal or plain decimal integers.
pub fn decode_int(value: &str) -> Option<u64> {
    let value = value.trim();
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('#'));
    match hex {
        Some(digits) => u64::from_str_radix(digits, 16).ok(),
        None => value.parse().ok(),
    }
}

/// PMU event lookup service.
pub trait PmuLookup {
    /// Architecture the events belong to, e.g. `GenuineIntel-6-3F`.
    fn arch(&self) -> &str;

    fn lookup(&self, name: &str) -> Option<&PmuEvent>;

    /// All events, sorted by name.
    fn events(&self) -> Box<dyn Iterator<Item = &PmuEvent> + '_>;
}

/// Immutable in-memory event database.
#[derive(Clone, Debug, Default)]
pub struct PmuDatabase {
    arch: String,
    events: BTreeMap<String, PmuEvent>,
}

impl PmuDatabase {
    pub fn new(arch: impl Into<String>, events: impl IntoIterator<Item = PmuEvent>) -> Self {
        let events = events
            .into_iter()
            .map(|event| (event.event_name.clone(), event))
            .collect();
        Self {
            arch: arch.into(),
            events,
        }
    }

    /// Loads a perfmon JSON array of event records.
    pub fn from_json<R>(arch: impl Into<String>, reader: R) -> Result<Self>
    where
        R: Read,
    {
        let events: Vec<PmuEvent> = serde_json::from_reader(reader)?;
        let db = Self::new(arch, events);
        debug!("loaded {} PMU events for {}", db.len(), db.arch);
        Ok(db)
    }

    /// Events of the running CPU, if the `x86` crate knows its model.
    pub fn host() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        let db = host::detect();
        #[cfg(not(target_arch = "x86_64"))]
        let db = None;
        db
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl PmuLookup for PmuDatabase {
    fn arch(&self) -> &str {
        &self.arch
    }

    fn lookup(&self, name: &str) -> Option<&PmuEvent> {
        self.events.get(name)
    }

    fn events(&self) -> Box<dyn Iterator<Item = &PmuEvent> + '_> {
        Box::new(self.events.values())
    }
}
