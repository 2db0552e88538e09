use std::collections::HashMap;

use log::debug;

use super::{Cache, Event, EventDescriptor, Hardware, Software};

/// A generic event and every name it answers to.
#[derive(Clone, Debug)]
pub struct GenericEvent {
    /// Canonical name, first of `aliases`.
    pub name: String,
    pub aliases: Vec<String>,
    pub event: Event,
}

/// Alias table of the generic hardware, software and hardware cache events.
///
/// Built once by [`GenericEvents::new`] and read-only afterwards.
#[derive(Clone, Debug)]
pub struct GenericEvents {
    events: Vec<GenericEvent>,
    // Uppercased alias -> index into `events`.
    by_alias: HashMap<String, usize>,
}

impl GenericEvents {
    pub fn new() -> Self {
        let hardware = Hardware::ALL.into_iter().map(|hw| {
            let aliases = hw.aliases().iter().map(|it| it.to_string()).collect();
            (aliases, Event::from(hw))
        });
        let software = Software::ALL.into_iter().map(|sw| {
            let aliases = sw.aliases().iter().map(|it| it.to_string()).collect();
            (aliases, Event::from(sw))
        });
        let cache = Cache::all().map(|cache| (vec![cache.name()], Event::from(cache)));

        let mut table = Self {
            events: vec![],
            by_alias: HashMap::new(),
        };
        for (aliases, event) in hardware.chain(software).chain(cache) {
            table.register(aliases, event);
        }
        debug!(
            "registered {} generic events under {} names",
            table.events.len(),
            table.by_alias.len()
        );

        table
    }

    fn register(&mut self, aliases: Vec<String>, event: Event) {
        let index = self.events.len();
        for alias in &aliases {
            self.by_alias.insert(alias.to_uppercase(), index);
        }
        self.events.push(GenericEvent {
            name: aliases[0].clone(),
            aliases,
            event,
        });
    }

    /// Case-insensitive lookup; the descriptor carries the canonical name.
    pub fn get(&self, name: &str) -> Option<EventDescriptor> {
        let index = *self.by_alias.get(&name.to_uppercase())?;
        let generic = &self.events[index];
        Some(EventDescriptor::new(&generic.name, generic.event.clone()))
    }

    /// Events in registration order: hardware, software, then cache.
    pub fn iter(&self) -> impl Iterator<Item = &GenericEvent> {
        self.events.iter()
    }
}

impl Default for GenericEvents {
    fn default() -> Self {
        Self::new()
    }
}
