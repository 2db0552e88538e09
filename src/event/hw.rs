use crate::ffi::bindings as b;

/// Generic hardware events, mapped by the kernel onto the running PMU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hardware {
    CpuCycle,
    Instr,
    CacheAccess,
    CacheMiss,
    BranchInstr,
    BranchMiss,
    BusCycle,
    FrontendStalledCycle,
    BackendStalledCycle,
    RefCpuCycle,
}

impl Hardware {
    pub const ALL: [Hardware; 10] = [
        Hardware::CpuCycle,
        Hardware::Instr,
        Hardware::CacheAccess,
        Hardware::CacheMiss,
        Hardware::BranchInstr,
        Hardware::BranchMiss,
        Hardware::BusCycle,
        Hardware::FrontendStalledCycle,
        Hardware::BackendStalledCycle,
        Hardware::RefCpuCycle,
    ];

    pub fn config(&self) -> u64 {
        let config = match self {
            Hardware::CpuCycle => b::PERF_COUNT_HW_CPU_CYCLES,
            Hardware::Instr => b::PERF_COUNT_HW_INSTRUCTIONS,
            Hardware::CacheAccess => b::PERF_COUNT_HW_CACHE_REFERENCES,
            Hardware::CacheMiss => b::PERF_COUNT_HW_CACHE_MISSES,
            Hardware::BranchInstr => b::PERF_COUNT_HW_BRANCH_INSTRUCTIONS,
            Hardware::BranchMiss => b::PERF_COUNT_HW_BRANCH_MISSES,
            Hardware::BusCycle => b::PERF_COUNT_HW_BUS_CYCLES,
            Hardware::FrontendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_FRONTEND,
            Hardware::BackendStalledCycle => b::PERF_COUNT_HW_STALLED_CYCLES_BACKEND,
            Hardware::RefCpuCycle => b::PERF_COUNT_HW_REF_CPU_CYCLES,
        };
        config as _
    }

    /// Accepted names, canonical name first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Hardware::CpuCycle => &["cycles", "cpu-cycles"],
            Hardware::Instr => &["instructions"],
            Hardware::CacheAccess => &["cache-references"],
            Hardware::CacheMiss => &["cache-misses"],
            Hardware::BranchInstr => &["branches", "branch-instructions"],
            Hardware::BranchMiss => &["branch-misses"],
            Hardware::BusCycle => &["bus-cycles"],
            Hardware::FrontendStalledCycle => &["stalled-cycles-frontend", "idle-cycles-frontend"],
            Hardware::BackendStalledCycle => &["stalled-cycles-backend", "idle-cycles-backend"],
            Hardware::RefCpuCycle => &["ref-cycles"],
        }
    }
}

super::into_event!(Hardware);

/// Generalized hardware cache event:
/// { L1-D, L1-I, LLC, DTLB, ITLB, BPU, NODE } x { read, write, prefetch } x { accesses, misses }
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cache {
    pub ty: Type,
    pub op: Op,
    pub result: OpResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    L1d,
    L1i,
    Ll,
    Dtlb,
    Itlb,
    Bpu,
    Node,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Write,
    Prefetch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpResult {
    Access,
    Miss,
}

impl Type {
    pub const ALL: [Type; 7] = [
        Type::L1d,
        Type::L1i,
        Type::Ll,
        Type::Dtlb,
        Type::Itlb,
        Type::Bpu,
        Type::Node,
    ];

    fn prefix(&self) -> &'static str {
        match self {
            Type::L1d => "L1-dcache",
            Type::L1i => "L1-icache",
            Type::Ll => "LLC",
            Type::Dtlb => "dTLB",
            Type::Itlb => "iTLB",
            Type::Bpu => "branch",
            Type::Node => "node",
        }
    }
}

impl Op {
    pub const ALL: [Op; 3] = [Op::Read, Op::Write, Op::Prefetch];
}

impl OpResult {
    pub const ALL: [OpResult; 2] = [OpResult::Access, OpResult::Miss];
}

impl Cache {
    pub fn new(ty: Type, op: Op, result: OpResult) -> Self {
        Self { ty, op, result }
    }

    /// Every type, op and result combination.
    pub fn all() -> impl Iterator<Item = Cache> {
        Type::ALL.into_iter().flat_map(|ty| {
            Op::ALL.into_iter().flat_map(move |op| {
                OpResult::ALL
                    .into_iter()
                    .map(move |result| Cache::new(ty, op, result))
            })
        })
    }

    pub fn config(&self) -> u64 {
        let id = match self.ty {
            Type::L1d => b::PERF_COUNT_HW_CACHE_L1D,
            Type::L1i => b::PERF_COUNT_HW_CACHE_L1I,
            Type::Ll => b::PERF_COUNT_HW_CACHE_LL,
            Type::Dtlb => b::PERF_COUNT_HW_CACHE_DTLB,
            Type::Itlb => b::PERF_COUNT_HW_CACHE_ITLB,
            Type::Bpu => b::PERF_COUNT_HW_CACHE_BPU,
            Type::Node => b::PERF_COUNT_HW_CACHE_NODE,
        } as u64;
        let op = match self.op {
            Op::Read => b::PERF_COUNT_HW_CACHE_OP_READ,
            Op::Write => b::PERF_COUNT_HW_CACHE_OP_WRITE,
            Op::Prefetch => b::PERF_COUNT_HW_CACHE_OP_PREFETCH,
        } as u64;
        let op_result = match self.result {
            OpResult::Access => b::PERF_COUNT_HW_CACHE_RESULT_ACCESS,
            OpResult::Miss => b::PERF_COUNT_HW_CACHE_RESULT_MISS,
        } as u64;
        id | (op << 8) | (op_result << 16)
    }

    /// Name in the `perf list` style, e.g. `L1-dcache-load-misses`.
    pub fn name(&self) -> String {
        let suffix = match (self.op, self.result) {
            (Op::Read, OpResult::Access) => "loads",
            (Op::Read, OpResult::Miss) => "load-misses",
            (Op::Write, OpResult::Access) => "stores",
            (Op::Write, OpResult::Miss) => "store-misses",
            (Op::Prefetch, OpResult::Access) => "prefetches",
            (Op::Prefetch, OpResult::Miss) => "prefetch-misses",
        };
        format!("{}-{}", self.ty.prefix(), suffix)
    }
}

super::into_event!(Cache);
