use super::{decode_int, CpuId, PmuDatabase, PmuLookup};
use crate::error::Error;
use crate::event::Raw;

const EVENTS: &str = r#"[
    {
        "EventCode": "0x3C",
        "UMask": "0x00",
        "EventName": "CPU_CLK_UNHALTED.THREAD_P",
        "BriefDescription": "Thread cycles when thread is not in halt state",
        "PublicDescription": "Counts the number of thread cycles while the thread is not in a halt state.",
        "Counter": "0,1,2,3",
        "CounterHTOff": "0,1,2,3,4,5,6,7",
        "SampleAfterValue": "2000003"
    },
    {
        "EventCode": "0xD1",
        "UMask": "0x20",
        "EventName": "MEM_LOAD_UOPS_RETIRED.L3_MISS",
        "BriefDescription": "Miss in last-level (L3) cache. Excludes Unknown data-source.",
        "Counter": "0,1,2,3",
        "SampleAfterValue": "100007",
        "PEBS": "1"
    }
]"#;

#[test]
fn test_decode_int() {
    assert_eq!(decode_int("0x3C"), Some(0x3C));
    assert_eq!(decode_int("0X3c"), Some(0x3C));
    assert_eq!(decode_int("#ff"), Some(0xFF));
    assert_eq!(decode_int("60"), Some(60));
    assert_eq!(decode_int(" 7 "), Some(7));
    assert_eq!(decode_int("0x"), None);
    assert_eq!(decode_int("0xB7,0xBB"), None);
    assert_eq!(decode_int(""), None);
    assert_eq!(decode_int("-1"), None);
}

#[test]
fn test_from_json() {
    let db = PmuDatabase::from_json("GenuineIntel-6-3F", EVENTS.as_bytes()).unwrap();
    assert_eq!(db.arch(), "GenuineIntel-6-3F");
    assert_eq!(db.len(), 2);

    let clk = db.lookup("CPU_CLK_UNHALTED.THREAD_P").unwrap();
    assert_eq!(clk.counter, "0,1,2,3");
    assert_eq!(clk.counter_ht_off.as_deref(), Some("0,1,2,3,4,5,6,7"));
    assert_eq!(clk.sample_after_value.as_deref(), Some("2000003"));
    assert_eq!(
        clk.raw().unwrap(),
        Raw {
            event_code: 0x3C,
            umask: 0
        }
    );

    let miss = db.lookup("MEM_LOAD_UOPS_RETIRED.L3_MISS").unwrap();
    assert!(miss.public_description.is_none());
    assert!(miss.counter_ht_off.is_none());
    assert_eq!(miss.raw().unwrap().config(), 0x20D1);

    let names: Vec<_> = db.events().map(|it| it.event_name.as_str()).collect();
    assert_eq!(names, ["CPU_CLK_UNHALTED.THREAD_P", "MEM_LOAD_UOPS_RETIRED.L3_MISS"]);

    assert!(db.lookup("cpu_clk_unhalted.thread_p").is_none());
}

#[test]
fn test_from_json_malformed() {
    let err = PmuDatabase::from_json("x", "{".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::PmuDatabase(_)));
}

#[test]
fn test_invalid_umask() {
    let json = r#"[{ "EventName": "BAD", "EventCode": "0x10", "UMask": "zz" }]"#;
    let db = PmuDatabase::from_json("x", json.as_bytes()).unwrap();
    let err = db.lookup("BAD").unwrap().raw().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidEncoding { field: "umask", ref value, .. } if value == "zz"
    ));
}

#[test]
fn test_cpuid() {
    let cpuinfo = "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 63
model name\t: Intel(R) Xeon(R) CPU E5-2699 v3 @ 2.30GHz
stepping\t: 2

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 63
";
    let id = CpuId::parse(cpuinfo).unwrap();
    assert_eq!(id.vendor, "GenuineIntel");
    assert_eq!((id.family, id.model), (6, 63));
    assert_eq!(id.key(), "GenuineIntel-6-3F");

    let amd = CpuId {
        vendor: "AuthenticAMD".to_string(),
        family: 25,
        model: 1,
    };
    assert_eq!(amd.key(), "AuthenticAMD-19-1");

    assert!(CpuId::parse("processor\t: 0\n").is_none());
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_host_keeps_ht_off_counters() {
    let (Some(db), Some(table)) = (PmuDatabase::host(), x86::perfcnt::intel::events()) else {
        return;
    };
    assert_eq!(db.len(), table.len());
    for desc in table.values() {
        let event = db.lookup(desc.event_name).unwrap();
        assert_eq!(
            event.counter_ht_off,
            desc.counter_ht_off.as_ref().map(|counter| format!("{:?}", counter))
        );
        assert_eq!(event.counter, format!("{:?}", desc.counter));
    }
}
