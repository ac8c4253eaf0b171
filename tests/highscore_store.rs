use skytype::difficulty::Difficulty;
use skytype::highscore::ScoreFile;
use tempfile::tempdir;

// Store behavior across instances: records survive reopening the same path.
#[test]
fn scores_survive_reopening_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("high_scores.json");

    {
        let store = ScoreFile::with_path(&path);
        assert!(store.save_if_best(7, Difficulty::Easy));
        assert!(store.save_if_best(3, Difficulty::Medium));
    }

    let reopened = ScoreFile::with_path(&path);
    assert_eq!(reopened.best_for(Difficulty::Easy), 7);
    assert_eq!(reopened.best_for(Difficulty::Medium), 3);
    assert_eq!(reopened.best_for(Difficulty::Hard), 0);
}

#[test]
fn better_score_replaces_record_and_worse_is_rejected() {
    let dir = tempdir().unwrap();
    let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

    assert!(store.save_if_best(7, Difficulty::Easy));

    assert!(store.save_if_best(10, Difficulty::Easy));
    assert_eq!(store.best_for(Difficulty::Easy), 10);
    assert_eq!(store.get_all().len(), 1);

    assert!(!store.save_if_best(5, Difficulty::Easy));
    assert_eq!(store.best_for(Difficulty::Easy), 10);
}

#[test]
fn replacing_one_mode_leaves_the_others_alone() {
    let dir = tempdir().unwrap();
    let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

    store.save_if_best(2, Difficulty::Easy);
    store.save_if_best(4, Difficulty::Medium);
    store.save_if_best(6, Difficulty::Hard);

    assert!(store.save_if_best(9, Difficulty::Medium));

    assert_eq!(store.best_for(Difficulty::Easy), 2);
    assert_eq!(store.best_for(Difficulty::Medium), 9);
    assert_eq!(store.best_for(Difficulty::Hard), 6);
}

#[test]
fn unreadable_store_degrades_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("high_scores.json");
    std::fs::write(&path, b"\x00\x01not json at all").unwrap();

    let store = ScoreFile::with_path(&path);
    assert!(store.get_all().is_empty());
    assert_eq!(store.best_for(Difficulty::Easy), 0);

    // A save over the corrupt file starts a fresh record set.
    assert!(store.save_if_best(1, Difficulty::Easy));
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn clear_then_save_starts_over() {
    let dir = tempdir().unwrap();
    let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

    store.save_if_best(8, Difficulty::Hard);
    store.clear();
    assert!(store.get_all().is_empty());

    assert!(store.save_if_best(1, Difficulty::Hard));
    assert_eq!(store.best_for(Difficulty::Hard), 1);
}
