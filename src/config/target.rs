use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct All;

#[derive(Clone, Copy, Debug)]
pub struct Cpu(pub u32);

impl Cpu {
    pub const ALL: All = All;
}

#[derive(Clone, Copy, Debug)]
pub struct Proc(pub u32);

impl Proc {
    pub const ALL: All = All;
    pub const CURRENT: Proc = Proc(0);
}

/// The process and CPU an event group monitors.
///
/// | pid  | cpu  | counts                                  |
/// |------|------|-----------------------------------------|
/// | `0`  | `-1` | the calling process on any CPU          |
/// | `n`  | `-1` | process `n` on any CPU                  |
/// | `n`  | `c`  | process `n` only while running on CPU `c` |
/// | `-1` | `c`  | every process on CPU `c`                |
///
/// `(-1, -1)` is rejected by the kernel. [`Target::new`] refuses it, and
/// opening a group on a converted selector that ends up there fails the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pid: i32,
    cpu: i32,
}

impl Target {
    pub fn new(pid: i32, cpu: i32) -> Result<Self> {
        Self { pid, cpu }.check()
    }

    /// Fails with [`Error::InvalidScope`] on `(-1, -1)`.
    pub fn check(self) -> Result<Self> {
        if self.pid == -1 && self.cpu == -1 {
            return Err(Error::InvalidScope);
        }
        Ok(self)
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    pub fn cpu(&self) -> i32 {
        self.cpu
    }
}

impl Default for Target {
    /// The calling process on any CPU.
    fn default() -> Self {
        Self { pid: 0, cpu: -1 }
    }
}

macro_rules! into_target {
    ($ty: ty, $destruct: tt, $pid: expr, $cpu: expr) => {
        impl From<$ty> for Target {
            fn from($destruct: $ty) -> Self {
                Target {
                    pid: $pid as _,
                    cpu: $cpu as _,
                }
            }
        }
    };
}

into_target!((Proc, Cpu), (Proc(pid), Cpu(cpu)), pid, cpu);
into_target!((Cpu, Proc), (Cpu(cpu), Proc(pid)), pid, cpu);

into_target!((Proc, All), (Proc(pid), _), pid, -1);
into_target!((All, Proc), (_, Proc(pid)), pid, -1);

into_target!((Cpu, All), (Cpu(cpu), _), -1, cpu);
into_target!((All, Cpu), (_, Cpu(cpu)), -1, cpu);
