#![allow(non_camel_case_types, dead_code)]

// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h

pub const PERF_TYPE_HARDWARE: u32 = 0;
pub const PERF_TYPE_SOFTWARE: u32 = 1;
pub const PERF_TYPE_TRACEPOINT: u32 = 2;
pub const PERF_TYPE_HW_CACHE: u32 = 3;
pub const PERF_TYPE_RAW: u32 = 4;
pub const PERF_TYPE_BREAKPOINT: u32 = 5;

pub const PERF_COUNT_HW_CPU_CYCLES: u32 = 0;
pub const PERF_COUNT_HW_INSTRUCTIONS: u32 = 1;
pub const PERF_COUNT_HW_CACHE_REFERENCES: u32 = 2;
pub const PERF_COUNT_HW_CACHE_MISSES: u32 = 3;
pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u32 = 4;
pub const PERF_COUNT_HW_BRANCH_MISSES: u32 = 5;
pub const PERF_COUNT_HW_BUS_CYCLES: u32 = 6;
pub const PERF_COUNT_HW_STALLED_CYCLES_FRONTEND: u32 = 7;
pub const PERF_COUNT_HW_STALLED_CYCLES_BACKEND: u32 = 8;
pub const PERF_COUNT_HW_REF_CPU_CYCLES: u32 = 9;

pub const PERF_COUNT_HW_CACHE_L1D: u32 = 0;
pub const PERF_COUNT_HW_CACHE_L1I: u32 = 1;
pub const PERF_COUNT_HW_CACHE_LL: u32 = 2;
pub const PERF_COUNT_HW_CACHE_DTLB: u32 = 3;
pub const PERF_COUNT_HW_CACHE_ITLB: u32 = 4;
pub const PERF_COUNT_HW_CACHE_BPU: u32 = 5;
pub const PERF_COUNT_HW_CACHE_NODE: u32 = 6;

pub const PERF_COUNT_HW_CACHE_OP_READ: u32 = 0;
pub const PERF_COUNT_HW_CACHE_OP_WRITE: u32 = 1;
pub const PERF_COUNT_HW_CACHE_OP_PREFETCH: u32 = 2;

pub const PERF_COUNT_HW_CACHE_RESULT_ACCESS: u32 = 0;
pub const PERF_COUNT_HW_CACHE_RESULT_MISS: u32 = 1;

pub const PERF_COUNT_SW_CPU_CLOCK: u32 = 0;
pub const PERF_COUNT_SW_TASK_CLOCK: u32 = 1;
pub const PERF_COUNT_SW_PAGE_FAULTS: u32 = 2;
pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u32 = 3;
pub const PERF_COUNT_SW_CPU_MIGRATIONS: u32 = 4;
pub const PERF_COUNT_SW_PAGE_FAULTS_MIN: u32 = 5;
pub const PERF_COUNT_SW_PAGE_FAULTS_MAJ: u32 = 6;
pub const PERF_COUNT_SW_ALIGNMENT_FAULTS: u32 = 7;
pub const PERF_COUNT_SW_EMULATION_FAULTS: u32 = 8;
pub const PERF_COUNT_SW_DUMMY: u32 = 9;
pub const PERF_COUNT_SW_BPF_OUTPUT: u32 = 10;
pub const PERF_COUNT_SW_CGROUP_SWITCHES: u32 = 11;

pub const PERF_FORMAT_TOTAL_TIME_ENABLED: u64 = 1 << 0;
pub const PERF_FORMAT_TOTAL_TIME_RUNNING: u64 = 1 << 1;
pub const PERF_FORMAT_ID: u64 = 1 << 2;
pub const PERF_FORMAT_GROUP: u64 = 1 << 3;

pub const PERF_FLAG_FD_CLOEXEC: u64 = 1 << 3;

// _IO('$', n) and _IOR('$', 7, u64), x86_64 encoding.
pub const PERF_EVENT_IOC_ENABLE: u64 = 0x2400;
pub const PERF_EVENT_IOC_DISABLE: u64 = 0x2401;
pub const PERF_EVENT_IOC_RESET: u64 = 0x2403;
pub const PERF_EVENT_IOC_ID: u64 = 0x8008_2407;

pub const PERF_ATTR_SIZE_VER5: u32 = 112;

/// `struct perf_event_attr` up to `PERF_ATTR_SIZE_VER5`.
///
/// The kernel accepts any published size and zero-extends the rest,
/// so newer fields are left out on purpose.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct perf_event_attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    pub sample_period: u64,
    pub sample_type: u64,
    pub read_format: u64,
    pub flags: u64,
    pub wakeup_events: u32,
    pub bp_type: u32,
    pub config1: u64,
    pub config2: u64,
    pub branch_sample_type: u64,
    pub sample_regs_user: u64,
    pub sample_stack_user: u32,
    pub clockid: i32,
    pub sample_regs_intr: u64,
    pub aux_watermark: u32,
    pub sample_max_stack: u16,
    pub __reserved_2: u16,
}

const _: () = assert!(size_of::<perf_event_attr>() == PERF_ATTR_SIZE_VER5 as usize);

macro_rules! bitfield {
    ($($get:ident, $set:ident, $bit:literal;)+) => {
        impl perf_event_attr {
            $(
            #[inline]
            pub fn $get(&self) -> u64 {
                (self.flags >> $bit) & 1
            }

            #[inline]
            pub fn $set(&mut self, val: u64) {
                self.flags = (self.flags & !(1 << $bit)) | ((val & 1) << $bit);
            }
            )+
        }
    };
}

bitfield! {
    disabled, set_disabled, 0;
    inherit, set_inherit, 1;
    pinned, set_pinned, 2;
    exclusive, set_exclusive, 3;
    exclude_user, set_exclude_user, 4;
    exclude_kernel, set_exclude_kernel, 5;
    exclude_hv, set_exclude_hv, 6;
    exclude_idle, set_exclude_idle, 7;
}
