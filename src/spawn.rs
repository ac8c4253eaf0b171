use crate::difficulty::Difficulty;
use rand::Rng;

/// Chance that a firing distraction cadence actually spawns a balloon.
pub const DISTRACTION_PROBABILITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Target,
    Distraction,
}

/// One independent periodic spawn trigger.
#[derive(Debug, Clone, Copy)]
pub struct CadenceSpec {
    pub interval_ms: u64,
    pub distraction: bool,
    /// Probability that a fire produces a balloon; targets always do.
    pub probability: f64,
}

impl CadenceSpec {
    const fn target(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            distraction: false,
            probability: 1.0,
        }
    }

    const fn distraction(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            distraction: true,
            probability: DISTRACTION_PROBABILITY,
        }
    }
}

/// Per-difficulty cadence table: overlapping target cadences plus independent
/// probabilistic distraction cadences, shorter intervals for harder modes.
pub fn cadence_table(mode: Difficulty) -> &'static [CadenceSpec] {
    match mode {
        Difficulty::Easy => &const {
            [
                CadenceSpec::target(2000),
                CadenceSpec::target(3200),
                CadenceSpec::distraction(3500),
                CadenceSpec::distraction(5000),
            ]
        },
        Difficulty::Medium => &const {
            [
                CadenceSpec::target(1600),
                CadenceSpec::target(2500),
                CadenceSpec::target(3400),
                CadenceSpec::distraction(3000),
                CadenceSpec::distraction(4500),
            ]
        },
        Difficulty::Hard => &const {
            [
                CadenceSpec::target(1200),
                CadenceSpec::target(2000),
                CadenceSpec::target(2800),
                CadenceSpec::distraction(2500),
                CadenceSpec::distraction(4000),
            ]
        },
    }
}

#[derive(Debug)]
struct Cadence {
    spec: CadenceSpec,
    elapsed_ms: u64,
}

/// Tick-driven balloon generator. Each cadence accumulates elapsed time
/// independently, so spawns overlap without central coordination.
///
/// The session only advances the spawner on unpaused ticks; replacing the
/// spawner wholesale on restart or difficulty change guarantees no stale
/// cadence can fire afterwards.
#[derive(Debug)]
pub struct Spawner {
    cadences: Vec<Cadence>,
}

impl Spawner {
    pub fn for_mode(mode: Difficulty) -> Self {
        Self {
            cadences: cadence_table(mode)
                .iter()
                .map(|spec| Cadence {
                    spec: *spec,
                    elapsed_ms: 0,
                })
                .collect(),
        }
    }

    /// Advance all cadences by `dt_ms` and return what fired, in cadence
    /// order. A distraction cadence rolls against its probability at fire
    /// time and may produce nothing.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<SpawnKind> {
        let mut fired = Vec::new();

        for cadence in &mut self.cadences {
            cadence.elapsed_ms += dt_ms;
            while cadence.elapsed_ms >= cadence.spec.interval_ms {
                cadence.elapsed_ms -= cadence.spec.interval_ms;
                if rng.gen::<f64>() < cadence.spec.probability {
                    fired.push(if cadence.spec.distraction {
                        SpawnKind::Distraction
                    } else {
                        SpawnKind::Target
                    });
                }
            }
        }

        fired
    }
}
