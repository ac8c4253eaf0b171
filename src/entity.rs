use crate::difficulty::Difficulty;
use rand::seq::SliceRandom;
use rand::Rng;

/// Vertical travel coordinate where a balloon enters, in field-height percent.
/// Balloons rise, so the position decreases every tick.
pub const SPAWN_POSITION: f64 = 100.0;
/// Crossing this coordinate counts as leaving the field for good.
pub const EXIT_THRESHOLD: f64 = -40.0;

const LANE_MIN: u16 = 5;
const LANE_MAX: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonColor {
    Yellow,
    Red,
    Blue,
    Violet,
    Green,
}

impl BalloonColor {
    pub const PALETTE: [BalloonColor; 5] = [
        BalloonColor::Yellow,
        BalloonColor::Red,
        BalloonColor::Blue,
        BalloonColor::Violet,
        BalloonColor::Green,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        *Self::PALETTE.choose(rng).unwrap_or(&BalloonColor::Yellow)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BalloonContent {
    /// Carries text the player must type; `typed` is the accepted prefix.
    Target { text: String, typed: String },
    /// Visual noise only. Never completable, never counts toward misses.
    Distraction,
}

/// One live game object. Speed is drawn once at spawn and never re-rolled.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub id: u64,
    pub color: BalloonColor,
    /// Horizontal position in field-width percent, fixed for the lifetime.
    pub lane: u16,
    pub content: BalloonContent,
    pub position: f64,
    speed: f64,
}

impl Balloon {
    pub fn target<R: Rng>(id: u64, text: String, mode: Difficulty, rng: &mut R) -> Self {
        // Downstream matching indexes into the text, so it must not be empty.
        debug_assert!(!text.is_empty(), "target balloon requires non-empty text");
        Self::spawn(
            id,
            BalloonContent::Target {
                text,
                typed: String::new(),
            },
            mode,
            rng,
        )
    }

    pub fn distraction<R: Rng>(id: u64, mode: Difficulty, rng: &mut R) -> Self {
        Self::spawn(id, BalloonContent::Distraction, mode, rng)
    }

    fn spawn<R: Rng>(id: u64, content: BalloonContent, mode: Difficulty, rng: &mut R) -> Self {
        Self {
            id,
            color: BalloonColor::random(rng),
            lane: rng.gen_range(LANE_MIN..=LANE_MAX),
            content,
            position: SPAWN_POSITION,
            speed: mode.base_speed() + rng.gen::<f64>() * mode.speed_jitter(),
        }
    }

    /// Advance one tick of motion. The caller skips this while paused.
    pub fn advance(&mut self) {
        self.position -= self.speed;
    }

    pub fn is_offscreen(&self) -> bool {
        self.position <= EXIT_THRESHOLD
    }

    pub fn is_target(&self) -> bool {
        matches!(self.content, BalloonContent::Target { .. })
    }

    pub fn is_completed(&self) -> bool {
        match &self.content {
            BalloonContent::Target { text, typed } => typed == text,
            BalloonContent::Distraction => false,
        }
    }

    /// The character the player must type next, if any.
    pub fn next_expected(&self) -> Option<char> {
        match &self.content {
            BalloonContent::Target { text, typed } => text.chars().nth(typed.chars().count()),
            BalloonContent::Distraction => None,
        }
    }

    /// Append `key` to the typed prefix when it matches the next expected
    /// character. Returns whether the balloon advanced.
    pub fn accept(&mut self, key: char) -> bool {
        if self.next_expected() != Some(key) {
            return false;
        }
        if let BalloonContent::Target { typed, .. } = &mut self.content {
            typed.push(key);
            return true;
        }
        false
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_target_spawn_state() {
        let balloon = Balloon::target(1, "CAT".to_string(), Difficulty::Medium, &mut rng());

        assert_eq!(balloon.id, 1);
        assert_eq!(balloon.position, SPAWN_POSITION);
        assert!(balloon.lane >= 5 && balloon.lane <= 90);
        assert!(balloon.is_target());
        assert!(!balloon.is_completed());
        assert_eq!(balloon.next_expected(), Some('C'));
    }

    #[test]
    fn test_speed_within_difficulty_range() {
        for mode in Difficulty::ALL {
            let mut r = rng();
            for _ in 0..100 {
                let balloon = Balloon::target(0, "A".to_string(), mode, &mut r);
                assert!(balloon.speed() >= mode.base_speed());
                assert!(balloon.speed() < mode.base_speed() + mode.speed_jitter());
            }
        }
    }

    #[test]
    fn test_advance_is_monotonic_and_fixed_speed() {
        let mut balloon = Balloon::target(0, "A".to_string(), Difficulty::Easy, &mut rng());
        let speed = balloon.speed();

        let mut previous = balloon.position;
        for _ in 0..10 {
            balloon.advance();
            assert!((previous - balloon.position - speed).abs() < 1e-9);
            previous = balloon.position;
        }
    }

    #[test]
    fn test_offscreen_at_exit_threshold() {
        let mut balloon = Balloon::target(0, "A".to_string(), Difficulty::Easy, &mut rng());
        assert!(!balloon.is_offscreen());

        balloon.position = EXIT_THRESHOLD + 0.1;
        assert!(!balloon.is_offscreen());

        balloon.position = EXIT_THRESHOLD;
        assert!(balloon.is_offscreen());
    }

    #[test]
    fn test_accept_builds_prefix() {
        let mut balloon = Balloon::target(0, "DOG".to_string(), Difficulty::Medium, &mut rng());

        assert!(!balloon.accept('X'));
        assert!(balloon.accept('D'));
        assert!(balloon.accept('O'));

        // typed is always a prefix of the text
        if let BalloonContent::Target { text, typed } = &balloon.content {
            assert!(text.starts_with(typed.as_str()));
            assert_eq!(typed, "DO");
        } else {
            panic!("expected target content");
        }

        assert!(!balloon.is_completed());
        assert!(balloon.accept('G'));
        assert!(balloon.is_completed());
        assert_eq!(balloon.next_expected(), None);
    }

    #[test]
    fn test_completed_balloon_rejects_further_input() {
        let mut balloon = Balloon::target(0, "A".to_string(), Difficulty::Easy, &mut rng());

        assert!(balloon.accept('A'));
        assert!(balloon.is_completed());
        assert!(!balloon.accept('A'));
    }

    #[test]
    fn test_distraction_never_matches() {
        let mut balloon = Balloon::distraction(0, Difficulty::Easy, &mut rng());

        assert!(!balloon.is_target());
        assert!(!balloon.is_completed());
        assert_eq!(balloon.next_expected(), None);
        for key in ['A', 'Z', ' '] {
            assert!(!balloon.accept(key));
        }
        assert!(!balloon.is_completed());
    }

    #[test]
    fn test_color_palette_has_five_values() {
        assert_eq!(BalloonColor::PALETTE.len(), 5);

        let mut r = rng();
        for _ in 0..20 {
            let color = BalloonColor::random(&mut r);
            assert!(BalloonColor::PALETTE.contains(&color));
        }
    }
}
