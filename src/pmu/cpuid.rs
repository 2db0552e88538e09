use std::fmt;
use std::fs;

const CPUINFO: &str = "/proc/cpuinfo";

/// CPU vendor, family and model, used to pick a PMU event database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuId {
    pub vendor: String,
    pub family: u32,
    pub model: u32,
}

impl CpuId {
    /// Reads `/proc/cpuinfo`.
    pub fn current() -> Option<Self> {
        let cpuinfo = fs::read_to_string(CPUINFO).ok()?;
        Self::parse(&cpuinfo)
    }

    /// Parses the first processor block of a `/proc/cpuinfo` dump.
    pub fn parse(cpuinfo: &str) -> Option<Self> {
        let mut vendor = None;
        let mut family = None;
        let mut model = None;

        for line in cpuinfo.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "vendor_id" => vendor = Some(value.to_string()),
                "cpu family" => family = value.parse().ok(),
                "model" => model = value.parse().ok(),
                _ => (),
            }
            if vendor.is_some() && family.is_some() && model.is_some() {
                break;
            }
        }

        Some(Self {
            vendor: vendor?,
            family: family?,
            model: model?,
        })
    }

    /// `<vendor>-<family>-<model>` with uppercase hex numbers,
    /// e.g. `GenuineIntel-6-3F`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:X}-{:X}", self.vendor, self.family, self.model)
    }
}
