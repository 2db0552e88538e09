use log::debug;

use super::tp::{TracepointLookup, TracepointRegistry};
use super::{EventDescriptor, GenericEvents, Tracepoint};
use crate::error::{Error, Result};
use crate::pmu::{PmuDatabase, PmuLookup};

type Pmu = Box<dyn PmuLookup + Send + Sync>;
type Tracepoints = Box<dyn TracepointLookup + Send + Sync>;

/// Resolves event names into descriptors.
///
/// Names are tried against the generic hardware, software and cache
/// aliases, then the PMU database, then the tracepoint registry. The first
/// namespace that knows the name wins.
pub struct Resolver {
    generic: GenericEvents,
    pmu: Option<Pmu>,
    tracepoints: Option<Tracepoints>,
}

impl Resolver {
    /// A resolver that only knows the generic events.
    pub fn new() -> Self {
        Self {
            generic: GenericEvents::new(),
            pmu: None,
            tracepoints: None,
        }
    }

    /// Generic events plus whatever the running system provides: the host
    /// PMU database and the kernel tracepoints.
    pub fn system() -> Self {
        let mut resolver = Self::new();
        if let Some(db) = PmuDatabase::host() {
            resolver = resolver.with_pmu(db);
        }
        match TracepointRegistry::system() {
            Ok(registry) => resolver = resolver.with_tracepoints(registry),
            Err(e) => debug!("tracepoints unavailable: {}", e),
        }
        resolver
    }

    pub fn with_pmu<P>(mut self, pmu: P) -> Self
    where
        P: PmuLookup + Send + Sync + 'static,
    {
        self.pmu = Some(Box::new(pmu));
        self
    }

    pub fn with_tracepoints<T>(mut self, tracepoints: T) -> Self
    where
        T: TracepointLookup + Send + Sync + 'static,
    {
        self.tracepoints = Some(Box::new(tracepoints));
        self
    }

    pub fn resolve(&self, name: &str) -> Result<EventDescriptor> {
        if let Some(desc) = self.generic.get(name) {
            return Ok(desc);
        }
        if let Some(event) = self.pmu.as_ref().and_then(|pmu| pmu.lookup(name)) {
            return Ok(EventDescriptor::new(&event.event_name, event.raw()?));
        }
        if let Some(info) = self.tracepoints.as_ref().and_then(|tp| tp.lookup(name)) {
            return Ok(EventDescriptor::new(&info.name, Tracepoint { id: info.id }));
        }
        Err(Error::UnknownEvent(name.to_string()))
    }

    /// Resolves a comma-separated list, keeping its order.
    pub fn resolve_list(&self, names: &str) -> Result<Vec<EventDescriptor>> {
        names
            .split(',')
            .map(|name| self.resolve(name.trim()))
            .collect()
    }

    pub fn generic(&self) -> &GenericEvents {
        &self.generic
    }

    pub fn pmu(&self) -> Option<&(dyn PmuLookup + Send + Sync)> {
        self.pmu.as_deref()
    }

    pub fn tracepoints(&self) -> Option<&(dyn TracepointLookup + Send + Sync)> {
        self.tracepoints.as_deref()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
