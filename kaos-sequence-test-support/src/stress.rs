//! Stress runner for litmus tests.

use std::collections::BTreeMap;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::thread;
use std::time::{ Duration, Instant };

use rand::rngs::StdRng;
use rand::{ Rng, SeedableRng };
use tracing::{ debug, info, warn };

use crate::error::{ Result, StressError };
use crate::litmus::{ Litmus, LitmusResult };
use crate::outcome::Expect;

pub const ENV_ITERATIONS: &str = "KAOS_SEQ_STRESS_ITERATIONS";
pub const ENV_SEED: &str = "KAOS_SEQ_STRESS_SEED";

/// Configuration for stress tests
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Total number of fresh states to race
    pub iterations: usize,
    /// States swept by one pair of actor threads
    pub batch_size: usize,
    /// Seed for start jitter (None = entropy)
    pub seed: Option<u64>,
    /// Upper bound of spin-loop hints an actor burns after each rendezvous.
    /// Drawn per actor per batch; keeps the skew small so actors overlap.
    pub max_jitter_spins: u32,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            iterations: 200_000,
            batch_size: 1024,
            seed: None,
            max_jitter_spins: 8,
        }
    }
}

impl StressConfig {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Defaults overlaid with `KAOS_SEQ_STRESS_ITERATIONS` / `KAOS_SEQ_STRESS_SEED`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(ENV_ITERATIONS) {
            config.iterations = raw
                .trim()
                .parse()
                .map_err(|_| StressError::invalid_env(ENV_ITERATIONS, raw.clone()))?;
        }
        if let Ok(raw) = std::env::var(ENV_SEED) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|_| StressError::invalid_env(ENV_SEED, raw.clone()))?;
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_jitter(mut self, spins: u32) -> Self {
        self.max_jitter_spins = spins;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(StressError::config("iterations must be greater than 0"));
        }
        if self.batch_size == 0 {
            return Err(StressError::config("batch size must be greater than 0"));
        }
        Ok(())
    }
}

/// One distinct outcome id and how often it was seen
#[derive(Debug, Clone)]
pub struct ObservedOutcome {
    pub id: String,
    pub count: u64,
    pub expect: Expect,
    pub desc: &'static str,
}

/// Tallied outcomes of one litmus run
#[derive(Debug, Clone)]
pub struct StressReport {
    pub name: &'static str,
    pub iterations: u64,
    pub duration: Duration,
    pub outcomes: Vec<ObservedOutcome>,
}

impl StressReport {
    pub fn count(&self, id: &str) -> u64 {
        self.outcomes
            .iter()
            .find(|o| o.id == id)
            .map_or(0, |o| o.count)
    }

    pub fn forbidden(&self) -> impl Iterator<Item = &ObservedOutcome> {
        self.outcomes.iter().filter(|o| o.expect == Expect::Forbidden)
    }

    pub fn interesting(&self) -> impl Iterator<Item = &ObservedOutcome> {
        self.outcomes.iter().filter(|o| o.expect == Expect::AcceptableInteresting)
    }

    pub fn is_passed(&self) -> bool {
        self.forbidden().next().is_none()
    }

    /// Fails with the first forbidden outcome observed.
    pub fn verify(&self) -> Result<()> {
        match self.forbidden().next() {
            None => Ok(()),
            Some(o) =>
                Err(StressError::Forbidden {
                    test: self.name.to_string(),
                    id: o.id.clone(),
                    count: o.count,
                    desc: o.desc.to_string(),
                }),
        }
    }
}

/// Races litmus actors over batches of fresh states
pub struct StressRunner {
    config: StressConfig,
}

impl StressRunner {
    pub fn new(config: StressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    pub fn run<T: Litmus>(&self) -> Result<StressReport> {
        self.config.validate()?;
        if !(1..=LitmusResult::MAX_ARITY).contains(&T::ARITY) {
            return Err(
                StressError::config(format!("{}: arity must be 1 or 2, got {}", T::NAME, T::ARITY))
            );
        }
        let span = tracing::info_span!("litmus", test = T::NAME);
        let _guard = span.enter();

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start = Instant::now();
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut remaining = self.config.iterations;

        while remaining > 0 {
            let n = remaining.min(self.config.batch_size);
            let states: Vec<T> = (0..n).map(|_| T::new()).collect();
            let results: Vec<LitmusResult> = (0..n).map(|_| LitmusResult::new(T::ARITY)).collect();
            let jitter = [
                rng.gen_range(0..=self.config.max_jitter_spins),
                rng.gen_range(0..=self.config.max_jitter_spins),
            ];

            race_batch(&states, &results, jitter)?;

            for (state, result) in states.iter().zip(&results) {
                state.arbiter(result);
                *counts.entry(result.id()).or_insert(0) += 1;
            }
            remaining -= n;
        }

        let table = T::outcomes();
        let outcomes: Vec<ObservedOutcome> = counts
            .into_iter()
            .map(|(id, count)| {
                let (expect, desc) = table.classify(&id);
                match expect {
                    Expect::Acceptable => debug!(id = %id, count, "acceptable outcome"),
                    Expect::AcceptableInteresting => info!(id = %id, count, desc, "interesting outcome"),
                    Expect::Forbidden => warn!(id = %id, count, desc, "forbidden outcome"),
                }
                ObservedOutcome { id, count, expect, desc }
            })
            .collect();

        Ok(StressReport {
            name: T::NAME,
            iterations: self.config.iterations as u64,
            duration: start.elapsed(),
            outcomes,
        })
    }
}

/// Per-state rendezvous: neither actor starts state `i` until both reached it.
///
/// `arrived[k]` holds how many states actor `k` has reached. It only grows,
/// so an actor is never more than one state ahead of the other.
struct Lockstep {
    arrived: [AtomicUsize; 2],
}

impl Lockstep {
    fn new() -> Self {
        Self {
            arrived: [AtomicUsize::new(0), AtomicUsize::new(0)],
        }
    }

    #[inline]
    fn arrive(&self, actor: usize, index: usize) {
        self.arrived[actor].store(index + 1, Ordering::Release);
        let other = &self.arrived[1 - actor];
        let mut spins = 0u32;
        while other.load(Ordering::Acquire) <= index {
            if spins < SPINS_BEFORE_YIELD {
                spins += 1;
                std::hint::spin_loop();
            } else {
                // Single-CPU hosts: let the other actor run
                thread::yield_now();
            }
        }
    }
}

const SPINS_BEFORE_YIELD: u32 = 1 << 12;

/// Marks an actor as past every state when it exits, panicking or not,
/// so the other actor never waits on it forever.
struct Departed<'a> {
    lockstep: &'a Lockstep,
    actor: usize,
}

impl Drop for Departed<'_> {
    fn drop(&mut self) {
        self.lockstep.arrived[self.actor].store(usize::MAX, Ordering::Release);
    }
}

/// Both actors sweep the batch in lockstep, one state at a time.
fn race_batch<T: Litmus>(states: &[T], results: &[LitmusResult], jitter: [u32; 2]) -> Result<()> {
    let lockstep = Lockstep::new();

    let (ok1, ok2) = thread::scope(|s| {
        let actor1 = s.spawn(|| {
            let _departed = Departed { lockstep: &lockstep, actor: 0 };
            for (i, (state, result)) in states.iter().zip(results).enumerate() {
                lockstep.arrive(0, i);
                spin(jitter[0]);
                state.actor1(result);
            }
        });
        let actor2 = s.spawn(|| {
            let _departed = Departed { lockstep: &lockstep, actor: 1 };
            for (i, (state, result)) in states.iter().zip(results).enumerate() {
                lockstep.arrive(1, i);
                spin(jitter[1]);
                state.actor2(result);
            }
        });
        (actor1.join().is_ok(), actor2.join().is_ok())
    });

    if ok1 && ok2 {
        Ok(())
    } else {
        Err(StressError::actor_panicked(T::NAME))
    }
}

#[inline]
fn spin(n: u32) {
    for _ in 0..n {
        std::hint::spin_loop();
    }
}

/// One boxed row; content is padded or cut to the box width.
fn format_row(content: &str) -> String {
    format!("║  {:<60.60}║", content)
}

fn row(content: &str) {
    eprintln!("{}", format_row(content));
}

/// Print a summary of litmus results
pub fn print_summary(report: &StressReport) {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    row(report.name);
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    row(&format!("Iterations:      {:>10}", report.iterations));
    row(&format!("Duration:        {:>10.2}s", report.duration.as_secs_f64()));
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    for o in &report.outcomes {
        row(&format!("[{}] {:>12} {}", o.id, o.count, o.expect));
    }
    eprintln!("╚══════════════════════════════════════════════════════════════╝");

    let forbidden: u64 = report.forbidden().map(|o| o.count).sum();
    let interesting: u64 = report.interesting().map(|o| o.count).sum();
    if forbidden > 0 {
        eprintln!("\n❌ FAILED: {} forbidden outcomes", forbidden);
    } else if interesting > 0 {
        eprintln!("\n⚠️  PASSED: {} interesting outcomes", interesting);
    } else {
        eprintln!("\n✅ PASSED");
    }
}
