use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};

const DEBUGFS_EVENTS: &str = "/sys/kernel/debug/tracing/events";
const TRACEFS_EVENTS: &str = "/sys/kernel/tracing/events";

/// Tracepoint event provided by the kernel tracepoint infrastructure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tracepoint {
    /// Tracepoint ID from under debugfs `tracing/events/*/*/id` if ftrace is enabled in the kernel.
    pub id: u64,
}

super::into_event!(Tracepoint);

/// A registered tracepoint, named `category:event`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracepointInfo {
    pub name: String,
    pub id: u64,
}

/// Tracepoint lookup service.
pub trait TracepointLookup {
    /// Case-insensitive lookup of a `category:event` name.
    fn lookup(&self, name: &str) -> Option<&TracepointInfo>;

    /// All tracepoints, sorted by name.
    fn tracepoints(&self) -> Box<dyn Iterator<Item = &TracepointInfo> + '_>;
}

/// Tracepoints found in a tracing `events` directory.
#[derive(Clone, Debug, Default)]
pub struct TracepointRegistry {
    tracepoints: BTreeMap<String, TracepointInfo>,
    // Uppercased name -> name.
    by_upper: HashMap<String, String>,
}

impl TracepointRegistry {
    /// Scans the debugfs tracing directory, then tracefs.
    pub fn system() -> Result<Self> {
        match Self::scan(DEBUGFS_EVENTS) {
            Ok(registry) => Ok(registry),
            Err(e) => {
                debug!("{}, trying {}", e, TRACEFS_EVENTS);
                Self::scan(TRACEFS_EVENTS)
            }
        }
    }

    /// Scans `<root>/<category>/<event>/id`.
    ///
    /// Entries without a readable numeric id are skipped.
    pub fn scan<P>(root: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let root = root.as_ref();
        let tracefs = |source: io::Error| Error::Tracefs {
            path: root.to_path_buf(),
            source,
        };

        let mut tracepoints = BTreeMap::new();
        for category in fs::read_dir(root).map_err(tracefs)? {
            let category = category.map_err(tracefs)?.path();
            if !category.is_dir() {
                continue;
            }
            let events = match fs::read_dir(&category) {
                Ok(events) => events,
                Err(e) => {
                    warn!("skipping tracepoint category {:?}: {}", category, e);
                    continue;
                }
            };
            for event in events.flatten() {
                let event = event.path();
                let id_file = event.join("id");
                if !id_file.is_file() {
                    continue;
                }
                let id = match read_id(&id_file) {
                    Ok(id) => id,
                    Err(e) => {
                        warn!("skipping tracepoint {:?}: {}", event, e);
                        continue;
                    }
                };
                let name = format!("{}:{}", file_name(&category), file_name(&event));
                tracepoints.insert(name.clone(), TracepointInfo { name, id });
            }
        }
        debug!("found {} tracepoints under {:?}", tracepoints.len(), root);

        let by_upper = tracepoints
            .keys()
            .map(|name| (name.to_uppercase(), name.clone()))
            .collect();

        Ok(Self {
            tracepoints,
            by_upper,
        })
    }

    pub fn len(&self) -> usize {
        self.tracepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracepoints.is_empty()
    }
}

impl TracepointLookup for TracepointRegistry {
    fn lookup(&self, name: &str) -> Option<&TracepointInfo> {
        let name = self.by_upper.get(&name.to_uppercase())?;
        self.tracepoints.get(name)
    }

    fn tracepoints(&self) -> Box<dyn Iterator<Item = &TracepointInfo> + '_> {
        Box::new(self.tracepoints.values())
    }
}

fn read_id(path: &Path) -> io::Result<u64> {
    let content = fs::read_to_string(path)?;
    content.trim().parse::<u64>().map_err(io::Error::other)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
