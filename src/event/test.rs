use std::fs;

use super::hw::{Op, OpResult, Type};
use super::tp::{TracepointLookup, TracepointRegistry};
use super::*;
use crate::error::Error;
use crate::pmu::{PmuDatabase, PmuEvent};

fn pmu_event(name: &str, event_code: &str, umask: &str) -> PmuEvent {
    PmuEvent {
        event_name: name.to_string(),
        event_code: event_code.to_string(),
        umask: umask.to_string(),
        counter: "0,1,2,3".to_string(),
        brief_description: None,
        public_description: None,
        sample_after_value: None,
        counter_ht_off: None,
    }
}

fn pmu(events: impl IntoIterator<Item = PmuEvent>) -> PmuDatabase {
    PmuDatabase::new("GenuineIntel-6-3F", events)
}

#[test]
fn test_hardware_constants() {
    let resolver = Resolver::new();

    let cycles = resolver.resolve("cycles").unwrap();
    assert_eq!(cycles.ty(), EventType::Hardware);
    assert_eq!(cycles.ty() as u32, 0);
    assert_eq!(cycles.config(), 0);

    let instructions = resolver.resolve("instructions").unwrap();
    assert_eq!(instructions.config(), 1);

    let branch_misses = resolver.resolve("branch-misses").unwrap();
    assert_eq!(branch_misses.config(), 5);

    let ref_cycles = resolver.resolve("ref-cycles").unwrap();
    assert_eq!(ref_cycles.config(), 9);
}

#[test]
fn test_software_constants() {
    let resolver = Resolver::new();

    let cpu_clock = resolver.resolve("cpu-clock").unwrap();
    assert_eq!(cpu_clock.ty(), EventType::Software);
    assert_eq!(cpu_clock.ty() as u32, 1);
    assert_eq!(cpu_clock.config(), 0);

    assert_eq!(resolver.resolve("task-clock").unwrap().config(), 1);
    assert_eq!(resolver.resolve("page-faults").unwrap().config(), 2);
    assert_eq!(resolver.resolve("context-switches").unwrap().config(), 3);
    assert_eq!(resolver.resolve("cpu-migrations").unwrap().config(), 4);
    assert_eq!(resolver.resolve("bpf-output").unwrap().config(), 10);
}

#[test]
fn test_alias_identity() {
    let resolver = Resolver::new();

    let pairs = [
        ("cycles", "cpu-cycles"),
        ("branches", "branch-instructions"),
        ("stalled-cycles-frontend", "idle-cycles-frontend"),
        ("page-faults", "faults"),
        ("context-switches", "cs"),
        ("cpu-migrations", "migrations"),
    ];
    for (canonical, alias) in pairs {
        let a = resolver.resolve(canonical).unwrap();
        let b = resolver.resolve(alias).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.name(), canonical);
    }
}

#[test]
fn test_case_insensitive() {
    let resolver = Resolver::new();
    let upper = resolver.resolve("CPU-CYCLES").unwrap();
    let mixed = resolver.resolve("L1-DCache-Load-Misses").unwrap();
    assert_eq!(upper.name(), "cycles");
    assert_eq!(mixed.name(), "L1-dcache-load-misses");
}

#[test]
fn test_cache_config() {
    let resolver = Resolver::new();

    let l1d_load_misses = resolver.resolve("L1-dcache-load-misses").unwrap();
    assert_eq!(l1d_load_misses.ty(), EventType::HwCache);
    assert_eq!(l1d_load_misses.config(), 0x10000);

    let llc_loads = resolver.resolve("LLC-loads").unwrap();
    assert_eq!(llc_loads.config(), 2);

    let dtlb_store_misses = resolver.resolve("dTLB-store-misses").unwrap();
    assert_eq!(dtlb_store_misses.config(), 3 | (1 << 8) | (1 << 16));

    let cache = Cache::new(Type::Node, Op::Prefetch, OpResult::Access);
    assert_eq!(cache.name(), "node-prefetches");
    assert_eq!(cache.config(), 6 | (2 << 8));
}

#[test]
fn test_unknown_event() {
    let resolver = Resolver::new();
    let err = resolver.resolve("no-such-event").unwrap_err();
    assert!(matches!(err, Error::UnknownEvent(name) if name == "no-such-event"));
}

#[test]
fn test_exclude_flags() {
    let resolver = Resolver::new();

    let cycles = resolver.resolve("cycles").unwrap();
    assert!(cycles.exclude_kernel());
    assert!(cycles.exclude_hv());

    for name in ["context-switches", "cpu-migrations"] {
        let desc = resolver.resolve(name).unwrap();
        assert!(!desc.exclude_kernel());
        assert!(desc.exclude_hv());
    }
}

#[test]
fn test_generic_events_order() {
    let generic = GenericEvents::new();
    let names: Vec<_> = generic.iter().map(|it| it.name.as_str()).collect();

    assert_eq!(names.len(), Hardware::ALL.len() + Software::ALL.len() + 42);
    assert_eq!(names[0], "cycles");
    assert_eq!(names[Hardware::ALL.len()], "cpu-clock");
    assert_eq!(names[names.len() - 1], "node-prefetch-misses");
}

#[test]
fn test_resolve_list() {
    let resolver = Resolver::new();
    let descs = resolver.resolve_list("instructions, cycles ,cs").unwrap();
    let names: Vec<_> = descs.iter().map(|it| it.name()).collect();
    assert_eq!(names, ["instructions", "cycles", "context-switches"]);

    let err = resolver.resolve_list("cycles,bogus").unwrap_err();
    assert!(matches!(err, Error::UnknownEvent(name) if name == "bogus"));
}

#[test]
fn test_pmu_raw_event() {
    let resolver = Resolver::new().with_pmu(pmu([
        pmu_event("INST_RETIRED.ANY_P", "0xC0", "0x00"),
        pmu_event("CPU_CLK_UNHALTED.THREAD_P", "0x3C", "0x00"),
        pmu_event("MEM_LOAD_UOPS_RETIRED.L1_HIT", "#D1", "1"),
    ]));

    let clk = resolver.resolve("CPU_CLK_UNHALTED.THREAD_P").unwrap();
    assert_eq!(clk.ty(), EventType::Raw);
    assert_eq!(clk.ty() as u32, 4);
    assert_eq!(clk.config(), 0x3C);
    assert_eq!(clk.name(), "CPU_CLK_UNHALTED.THREAD_P");
    assert!(clk.exclude_kernel());

    let l1_hit = resolver.resolve("MEM_LOAD_UOPS_RETIRED.L1_HIT").unwrap();
    assert_eq!(l1_hit.config(), (1 << 8) | 0xD1);
}

#[test]
fn test_pmu_invalid_encoding() {
    let resolver = Resolver::new().with_pmu(pmu([pmu_event("OFFCORE", "0xB7,0xBB", "0x01")]));
    let err = resolver.resolve("OFFCORE").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidEncoding { field: "event code", .. }
    ));
}

#[test]
fn test_generic_before_pmu() {
    let resolver = Resolver::new().with_pmu(pmu([pmu_event("cycles", "0x3C", "0x00")]));
    let cycles = resolver.resolve("cycles").unwrap();
    assert_eq!(cycles.ty(), EventType::Hardware);
}

#[test]
fn test_tracepoint() {
    let dir = tempfile::tempdir().unwrap();
    let event = dir.path().join("sched").join("sched_switch");
    fs::create_dir_all(&event).unwrap();
    fs::write(event.join("id"), "316\n").unwrap();

    let registry = TracepointRegistry::scan(dir.path()).unwrap();
    let resolver = Resolver::new().with_tracepoints(registry);

    let desc = resolver.resolve("SCHED:SCHED_SWITCH").unwrap();
    assert_eq!(desc.ty(), EventType::Tracepoint);
    assert_eq!(desc.ty() as u32, 2);
    assert_eq!(desc.config(), 316);
    assert_eq!(desc.name(), "sched:sched_switch");
}

#[test]
fn test_tracepoint_registry_scan() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for (category, event, id) in [
        ("sched", "sched_switch", "316"),
        ("irq", "irq_handler_entry", "130"),
        ("irq", "broken", "not-a-number"),
    ] {
        let path = root.join(category).join(event);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("id"), id).unwrap();
    }
    fs::create_dir_all(root.join("irq").join("no_id")).unwrap();
    fs::write(root.join("irq").join("enable"), "1").unwrap();
    fs::write(root.join("header_page"), "").unwrap();

    let registry = TracepointRegistry::scan(root).unwrap();
    assert_eq!(registry.len(), 2);

    let names: Vec<_> = registry.tracepoints().map(|it| it.name.as_str()).collect();
    assert_eq!(names, ["irq:irq_handler_entry", "sched:sched_switch"]);
    assert_eq!(registry.lookup("irq:IRQ_handler_entry").unwrap().id, 130);
    assert!(registry.lookup("irq:broken").is_none());
}

#[test]
fn test_tracepoint_registry_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for (event, id) in [("ab", "2"), ("a_b", "1"), ("Ac", "3")] {
        let path = root.join("sys").join(event);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("id"), id).unwrap();
    }

    let registry = TracepointRegistry::scan(root).unwrap();
    let names: Vec<_> = registry.tracepoints().map(|it| it.name.as_str()).collect();
    assert_eq!(names, ["sys:Ac", "sys:a_b", "sys:ab"]);

    assert_eq!(registry.lookup("SYS:A_B").unwrap().id, 1);
    assert_eq!(registry.lookup("sys:ac").unwrap().name, "sys:Ac");
}

#[test]
fn test_tracepoint_registry_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = TracepointRegistry::scan(dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, Error::Tracefs { .. }));
}
