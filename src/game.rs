use crate::content::ContentSource;
use crate::difficulty::Difficulty;
use crate::entity::Balloon;
use crate::highscore::ScoreFile;
use crate::spawn::{SpawnKind, Spawner};
use crate::TICK_RATE_MS;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Visual feedback window between completing a balloon and removing it.
pub const POP_DELAY_MS: u64 = 100;
/// Missing this many target balloons ends the session.
pub const MISS_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Active,
    Ended { won: bool },
}

#[derive(Debug, Clone, Copy)]
struct PendingPop {
    id: u64,
    remaining_ms: u64,
}

/// One playing session: the live balloon set, counters, pause flag, and the
/// loss transition. Everything a session touches is owned here, so restart
/// reinitializes it and go-home drops it with no timers left behind.
pub struct Game {
    pub mode: Difficulty,
    pub score: u32,
    pub missed: u32,
    pub balloons: Vec<Balloon>,
    pub paused: bool,
    pub phase: GamePhase,
    /// Whether the final score set a new record; meaningful once ended.
    pub new_best: bool,
    next_id: u64,
    /// Ids already resolved by pop or miss. First outcome wins; nothing is
    /// counted or removed twice.
    processed: HashSet<u64>,
    pending_pops: Vec<PendingPop>,
    spawner: Spawner,
    content: Box<dyn ContentSource>,
    scores: Option<ScoreFile>,
    rng: StdRng,
}

impl Game {
    pub fn new(
        mode: Difficulty,
        content: Box<dyn ContentSource>,
        scores: Option<ScoreFile>,
    ) -> Self {
        Self::with_seed(mode, content, scores, rand::random())
    }

    pub fn with_seed(
        mode: Difficulty,
        content: Box<dyn ContentSource>,
        scores: Option<ScoreFile>,
        seed: u64,
    ) -> Self {
        Self {
            mode,
            score: 0,
            missed: 0,
            balloons: Vec::new(),
            paused: false,
            phase: GamePhase::Active,
            new_best: false,
            next_id: 0,
            processed: HashSet::new(),
            pending_pops: Vec::new(),
            spawner: Spawner::for_mode(mode),
            content,
            scores,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, GamePhase::Active)
    }

    pub fn toggle_pause(&mut self) {
        if self.is_active() {
            self.paused = !self.paused;
        }
    }

    /// Advance the session by one tick: pending pops, spawn cadences, then
    /// balloon motion with miss resolution. Paused or ended sessions do not
    /// move at all.
    pub fn on_tick(&mut self) {
        if self.paused || !self.is_active() {
            return;
        }

        self.advance_pending_pops();
        self.spawn_due();
        self.advance_balloons();
    }

    /// Queue a completed balloon for removal once the pop delay elapses.
    pub fn schedule_pop(&mut self, id: u64) {
        if self.processed.contains(&id) {
            return;
        }
        if self.pending_pops.iter().any(|pending| pending.id == id) {
            return;
        }
        self.pending_pops.push(PendingPop {
            id,
            remaining_ms: POP_DELAY_MS,
        });
    }

    /// Resolve a miss for `id`. Idempotent: a second call for the same id, or
    /// a call racing a pop, changes nothing.
    pub fn resolve_miss(&mut self, id: u64) {
        if !self.processed.insert(id) {
            return;
        }

        let Some(idx) = self.balloons.iter().position(|b| b.id == id) else {
            return;
        };
        let balloon = self.balloons.remove(idx);
        // A pop that was still waiting on its feedback delay loses the race.
        self.pending_pops.retain(|pending| pending.id != id);

        if balloon.is_target() && !balloon.is_completed() {
            self.missed += 1;
            if self.missed >= MISS_LIMIT {
                self.finish();
            }
        }
    }

    fn resolve_pop(&mut self, id: u64) {
        if !self.processed.insert(id) {
            return;
        }

        let Some(idx) = self.balloons.iter().position(|b| b.id == id) else {
            return;
        };
        let balloon = self.balloons.remove(idx);
        if balloon.is_completed() {
            self.score += 1;
        }
    }

    fn advance_pending_pops(&mut self) {
        for pending in &mut self.pending_pops {
            pending.remaining_ms = pending.remaining_ms.saturating_sub(TICK_RATE_MS);
        }

        let due: Vec<u64> = self
            .pending_pops
            .iter()
            .filter(|pending| pending.remaining_ms == 0)
            .map(|pending| pending.id)
            .collect();
        self.pending_pops.retain(|pending| pending.remaining_ms > 0);

        for id in due {
            self.resolve_pop(id);
        }
    }

    fn spawn_due(&mut self) {
        for kind in self.spawner.tick(TICK_RATE_MS, &mut self.rng) {
            let id = self.next_id;
            self.next_id += 1;

            let balloon = match kind {
                SpawnKind::Target => {
                    let text = self.content.generate(self.mode);
                    debug_assert!(!text.is_empty(), "content source returned empty text");
                    Balloon::target(id, text, self.mode, &mut self.rng)
                }
                SpawnKind::Distraction => Balloon::distraction(id, self.mode, &mut self.rng),
            };
            self.balloons.push(balloon);
        }
    }

    fn advance_balloons(&mut self) {
        let mut missed_ids = Vec::new();
        for balloon in &mut self.balloons {
            balloon.advance();
            if balloon.is_offscreen() {
                missed_ids.push(balloon.id);
            }
        }

        for id in missed_ids {
            self.resolve_miss(id);
            if !self.is_active() {
                break;
            }
        }
    }

    fn finish(&mut self) {
        // Loss is the only natural end; a win condition is a deliberate
        // non-feature (see DESIGN.md).
        self.phase = GamePhase::Ended { won: false };
        if let Some(scores) = &self.scores {
            self.new_best = scores.save_if_best(self.score, self.mode);
        }
    }

    /// Reinitialize for another round at the same difficulty: counters,
    /// balloon set, id counter, processed guard, pending pops, and fresh
    /// spawn cadences.
    pub fn restart(&mut self) {
        self.score = 0;
        self.missed = 0;
        self.balloons.clear();
        self.paused = false;
        self.phase = GamePhase::Active;
        self.new_best = false;
        self.next_id = 0;
        self.processed.clear();
        self.pending_pops.clear();
        self.spawner = Spawner::for_mode(self.mode);
    }
}
