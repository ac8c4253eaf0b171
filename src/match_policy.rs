use crate::game::Game;

/// Reserved pause/resume toggle. Space never collides with balloon text,
/// which is all letters.
pub const PAUSE_KEY: char = ' ';

/// Apply one typed key to the session.
///
/// The pause toggle flips the flag and swallows the key; while paused every
/// other key is ignored. Otherwise the key is uppercased and offered to every
/// live, uncompleted target balloon — all balloons whose next expected
/// character matches advance on the same keystroke, not just the first.
pub fn on_key(game: &mut Game, key: char) {
    if !game.is_active() {
        return;
    }
    if key == PAUSE_KEY {
        game.toggle_pause();
        return;
    }
    if game.paused {
        return;
    }

    let key = key.to_ascii_uppercase();

    let mut completed = Vec::new();
    for balloon in &mut game.balloons {
        if balloon.is_completed() {
            continue;
        }
        if balloon.accept(key) && balloon.is_completed() {
            completed.push(balloon.id);
        }
    }

    for id in completed {
        game.schedule_pop(id);
    }
}
