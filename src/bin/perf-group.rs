use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use perf_group::config::{Cpu, Proc};
use perf_group::count::EventGroup;
use perf_group::event::tp::TracepointRegistry;
use perf_group::event::{EventDescriptor, EventType, Resolver};
use perf_group::pmu::{CpuId, PmuDatabase};

const DEFAULT_EVENTS: &str = "cpu-clock,context-switches,cpu-migrations,page-faults,\
                              cycles,instructions,branches,branch-misses";

/// Count perf events system-wide, or list the events this host knows about.
#[derive(Debug, Parser)]
#[command(name = "perf-group", version, about)]
struct Opt {
    /// Perfmon JSON file to use instead of the host PMU event table.
    #[arg(long, global = true, value_name = "FILE")]
    pmu_events: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List generic events, PMU events and tracepoints.
    List,

    /// Count events on every CPU for a while and print the totals.
    Stat {
        /// Comma-separated event names.
        #[arg(short, long, default_value = DEFAULT_EVENTS)]
        events: String,

        /// Measurement window in milliseconds.
        #[arg(short, long, default_value_t = 2000)]
        duration: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Opt::parse();
    let resolver = resolver(opt.pmu_events.as_ref())?;

    match opt.action {
        Action::List => list(&resolver),
        Action::Stat { events, duration } => {
            stat(&resolver, &events, Duration::from_millis(duration))
        }
    }
}

fn resolver(pmu_events: Option<&PathBuf>) -> Result<Resolver> {
    let mut resolver = Resolver::new();

    let pmu = match pmu_events {
        Some(path) => {
            let arch = CpuId::current()
                .map(|id| id.key())
                .unwrap_or_else(|| path.display().to_string());
            let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
            Some(PmuDatabase::from_json(arch, BufReader::new(file))?)
        }
        None => PmuDatabase::host(),
    };
    if let Some(pmu) = pmu {
        resolver = resolver.with_pmu(pmu);
    }

    match TracepointRegistry::system() {
        Ok(registry) => resolver = resolver.with_tracepoints(registry),
        Err(e) => debug!("{}", e),
    }

    Ok(resolver)
}

fn list(resolver: &Resolver) -> Result<()> {
    let sections = [
        ("Hardware events", EventType::Hardware),
        ("Hardware cache events", EventType::HwCache),
        ("Software events", EventType::Software),
    ];
    for (i, (title, ty)) in sections.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}:", title);
        for event in resolver.generic().iter().filter(|it| it.event.ty() == ty) {
            println!("\t{}", event.aliases.join(", "));
        }
    }

    match resolver.pmu() {
        Some(pmu) => {
            println!("\nPMU events: [Arch: {}]", pmu.arch());
            for event in pmu.events() {
                println!("{}:", event.event_name);
                println!("\tCounter: {}", event.counter);
                if let Some(desc) = &event.public_description {
                    println!("\tPublicDescription: {}", desc);
                }
                if let Some(desc) = &event.brief_description {
                    println!("\tBriefDescription: {}", desc);
                }
                println!("\tEventCode: {}", event.event_code);
                println!("\tUMask: {}", event.umask);
                if let Some(value) = &event.sample_after_value {
                    println!("\tSampleAfterValue: {}", value);
                }
                if let Some(counter) = &event.counter_ht_off {
                    println!("\tCounterHTOff: {}", counter);
                }
            }
        }
        None => println!("\nPMU events: none for this CPU"),
    }

    if let Some(tracepoints) = resolver.tracepoints() {
        println!("\nTracepoints:");
        for tp in tracepoints.tracepoints() {
            println!("\t{}", tp.name);
        }
    }

    Ok(())
}

fn stat(resolver: &Resolver, events: &str, duration: Duration) -> Result<()> {
    let descs = resolver.resolve_list(events)?;
    let cpus = thread::available_parallelism()?.get();

    // One single-event group per event and CPU.
    let mut groups: Vec<(EventDescriptor, Vec<EventGroup>)> = descs
        .into_iter()
        .map(|desc| {
            let per_cpu = (0..cpus)
                .map(|_| EventGroup::new(vec![desc.clone()]))
                .collect();
            (desc, per_cpu)
        })
        .collect();

    for (desc, per_cpu) in &mut groups {
        for (cpu, group) in per_cpu.iter_mut().enumerate() {
            group
                .start((Proc::ALL, Cpu(cpu as u32)))
                .with_context(|| format!("cannot count {} on cpu {}", desc.name(), cpu))?;
        }
    }

    thread::sleep(duration);

    for (desc, per_cpu) in &mut groups {
        let mut total = 0u64;
        for group in per_cpu.iter_mut() {
            total += group.read_value()?;
        }
        println!("{}: {}", desc.name(), group_digits(total));
    }

    for (_, per_cpu) in &mut groups {
        for group in per_cpu.iter_mut() {
            group.shutdown()?;
        }
    }

    Ok(())
}

/// `1234567` -> `1,234,567`.
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
