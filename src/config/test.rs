use std::mem::offset_of;

use super::attr::from;
use super::{Cpu, Proc, Target};
use crate::error::Error;
use crate::event::{Cache, EventDescriptor, Hardware, Raw, Software};
use crate::ffi::{bindings as b, Attr};

#[test]
fn test_attr_layout() {
    assert_eq!(size_of::<Attr>(), 112);
    assert_eq!(offset_of!(Attr, type_), 0);
    assert_eq!(offset_of!(Attr, size), 4);
    assert_eq!(offset_of!(Attr, config), 8);
    assert_eq!(offset_of!(Attr, read_format), 32);
    assert_eq!(offset_of!(Attr, flags), 40);
    assert_eq!(offset_of!(Attr, config1), 56);
    assert_eq!(offset_of!(Attr, config2), 64);
    assert_eq!(offset_of!(Attr, sample_stack_user), 88);
    assert_eq!(offset_of!(Attr, clockid), 92);
    assert_eq!(offset_of!(Attr, aux_watermark), 104);
    assert_eq!(offset_of!(Attr, sample_max_stack), 108);
}

#[test]
fn test_attr_from_hardware() {
    let attr = from(&EventDescriptor::new("instructions", Hardware::Instr));

    assert_eq!(attr.size, 112);
    assert_eq!(attr.type_, b::PERF_TYPE_HARDWARE);
    assert_eq!(attr.config, 1);
    assert_eq!(attr.read_format, b::PERF_FORMAT_GROUP | b::PERF_FORMAT_ID);
    assert_eq!(attr.disabled(), 1);
    assert_eq!(attr.exclude_kernel(), 1);
    assert_eq!(attr.exclude_hv(), 1);
    assert_eq!(attr.exclude_user(), 0);
    assert_eq!(attr.inherit(), 0);
}

#[test]
fn test_attr_from_scheduler_event() {
    let attr = from(&EventDescriptor::new("cs", Software::CtxSwitch));

    assert_eq!(attr.type_, b::PERF_TYPE_SOFTWARE);
    assert_eq!(attr.config, 3);
    assert_eq!(attr.disabled(), 1);
    assert_eq!(attr.exclude_kernel(), 0);
    assert_eq!(attr.exclude_hv(), 1);
}

#[test]
fn test_attr_from_raw_and_cache() {
    let raw = from(&EventDescriptor::new(
        "MEM_LOAD_UOPS_RETIRED.L3_MISS",
        Raw {
            event_code: 0xD1,
            umask: 0x20,
        },
    ));
    assert_eq!(raw.type_, b::PERF_TYPE_RAW);
    assert_eq!(raw.config, 0x20D1);

    let cache = Cache::all().next().unwrap();
    let attr = from(&EventDescriptor::new(cache.name(), cache));
    assert_eq!(attr.type_, b::PERF_TYPE_HW_CACHE);
    assert_eq!(attr.config, 0);
}

#[test]
fn test_target() {
    let target = Target::new(0, -1).unwrap();
    assert_eq!((target.pid(), target.cpu()), (0, -1));
    assert_eq!(Target::default(), target);

    let target = Target::new(-1, 3).unwrap();
    assert_eq!((target.pid(), target.cpu()), (-1, 3));

    assert!(matches!(Target::new(-1, -1), Err(Error::InvalidScope)));
}

#[test]
fn test_target_from() {
    let target = Target::from((Proc::CURRENT, Cpu::ALL));
    assert_eq!((target.pid(), target.cpu()), (0, -1));

    let target = Target::from((Proc::ALL, Cpu(2)));
    assert_eq!((target.pid(), target.cpu()), (-1, 2));

    let target = Target::from((Cpu(1), Proc(42)));
    assert_eq!((target.pid(), target.cpu()), (42, 1));
}
