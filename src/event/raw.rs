/// A "raw" implementation-specific event, as listed in a PMU event database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Raw {
    /// Event select, `IA32_PERFEVTSELx[7:0]`.
    pub event_code: u64,
    /// Unit mask, `IA32_PERFEVTSELx[15:8]`.
    pub umask: u64,
}

impl Raw {
    pub fn config(&self) -> u64 {
        (self.umask << 8) | self.event_code
    }
}

super::into_event!(Raw);
