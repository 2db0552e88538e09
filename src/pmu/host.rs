use log::debug;
use x86::perfcnt::intel::{events, EventDescription, Tuple};

use super::{CpuId, PmuDatabase, PmuEvent};

pub(super) fn detect() -> Option<PmuDatabase> {
    let Some(table) = events() else {
        debug!("no PMU event table for this CPU");
        return None;
    };
    let arch = CpuId::current()
        .map(|id| id.key())
        .unwrap_or_else(|| "unknown".to_string());

    Some(PmuDatabase::new(arch, table.values().map(from_description)))
}

fn from_description(desc: &EventDescription) -> PmuEvent {
    PmuEvent {
        event_name: desc.event_name.to_string(),
        event_code: tuple(&desc.event_code),
        umask: tuple(&desc.umask),
        counter: format!("{:?}", desc.counter),
        brief_description: Some(desc.brief_description.to_string()),
        public_description: desc.public_description.map(str::to_string),
        sample_after_value: Some(desc.sample_after_value.to_string()),
        counter_ht_off: desc.counter_ht_off.as_ref().map(|counter| format!("{:?}", counter)),
    }
}

// Offcore events carry two codes, which `decode_int` rejects like any other
// multi-valued perfmon field.
fn tuple(tuple: &Tuple) -> String {
    match tuple {
        Tuple::One(code) => format!("0x{:02X}", code),
        Tuple::Two(a, b) => format!("0x{:02X},0x{:02X}", a, b),
    }
}
