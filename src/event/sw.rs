use crate::ffi::bindings as b;

/// Software events provided by the kernel, even if the hardware
/// does not support performance events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Software {
    CpuClock,
    TaskClock,

    PageFault,
    MinorPageFault,
    MajorPageFault,

    EmuFault,
    AlignFault,

    CtxSwitch,
    CgroupSwitch,
    CpuMigration,

    Dummy,
    BpfOutput,
}

impl Software {
    pub const ALL: [Software; 12] = [
        Software::CpuClock,
        Software::TaskClock,
        Software::PageFault,
        Software::CtxSwitch,
        Software::CpuMigration,
        Software::MinorPageFault,
        Software::MajorPageFault,
        Software::AlignFault,
        Software::EmuFault,
        Software::Dummy,
        Software::BpfOutput,
        Software::CgroupSwitch,
    ];

    pub fn config(&self) -> u64 {
        let config = match self {
            Software::CpuClock => b::PERF_COUNT_SW_CPU_CLOCK,
            Software::TaskClock => b::PERF_COUNT_SW_TASK_CLOCK,
            Software::PageFault => b::PERF_COUNT_SW_PAGE_FAULTS,
            Software::MinorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MIN,
            Software::MajorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MAJ,
            Software::EmuFault => b::PERF_COUNT_SW_EMULATION_FAULTS,
            Software::AlignFault => b::PERF_COUNT_SW_ALIGNMENT_FAULTS,
            Software::CtxSwitch => b::PERF_COUNT_SW_CONTEXT_SWITCHES,
            Software::CgroupSwitch => b::PERF_COUNT_SW_CGROUP_SWITCHES,
            Software::CpuMigration => b::PERF_COUNT_SW_CPU_MIGRATIONS,
            Software::Dummy => b::PERF_COUNT_SW_DUMMY,
            Software::BpfOutput => b::PERF_COUNT_SW_BPF_OUTPUT,
        };
        config as _
    }

    /// Accepted names, canonical name first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Software::CpuClock => &["cpu-clock"],
            Software::TaskClock => &["task-clock"],
            Software::PageFault => &["page-faults", "faults"],
            Software::MinorPageFault => &["minor-faults"],
            Software::MajorPageFault => &["major-faults"],
            Software::EmuFault => &["emulation-faults"],
            Software::AlignFault => &["alignment-faults"],
            Software::CtxSwitch => &["context-switches", "cs"],
            Software::CgroupSwitch => &["cgroup-switches"],
            Software::CpuMigration => &["cpu-migrations", "migrations"],
            Software::Dummy => &["dummy"],
            Software::BpfOutput => &["bpf-output"],
        }
    }

    /// Scheduler events only happen in kernel mode, so excluding the
    /// kernel would always count zero.
    pub fn requires_kernel(&self) -> bool {
        matches!(self, Software::CtxSwitch | Software::CpuMigration)
    }
}

super::into_event!(Software);
