//! Integration tests for bracket stores: full replace, rejection of empty draws, file layout.

use draw_engine::{
    generate_bracket, Bracket, BracketError, BracketStore, Competitor, EngineConfig,
    JsonFileBracketStore, MemoryBracketStore, StoreError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

fn draw(n: usize) -> Bracket {
    let competitors: Vec<_> = (0..n).map(|i| Competitor::new(format!("a{i}"))).collect();
    let mut rng = StdRng::seed_from_u64(n as u64);
    generate_bracket(&competitors, &[], &EngineConfig::default(), &mut rng).unwrap()
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("draw-store-{}", Uuid::new_v4()))
}

fn check_replace_semantics(store: &dyn BracketStore) {
    assert!(store.load_pairings("comp-1").unwrap().is_none());

    let saved = store.create_or_replace_pairings("comp-1", &draw(4)).unwrap();
    assert_eq!(saved.competition_id, "comp-1");
    assert_eq!(store.load_pairings("comp-1").unwrap(), Some(saved));

    let replacement = draw(8);
    store.create_or_replace_pairings("comp-1", &replacement).unwrap();
    let loaded = store.load_pairings("comp-1").unwrap().unwrap();
    assert_eq!(loaded.matches, replacement);

    // An empty draw is refused and the saved one stays.
    let err = store
        .create_or_replace_pairings("comp-1", &Bracket::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected(BracketError::EmptyBracket)));
    assert_eq!(store.load_pairings("comp-1").unwrap().unwrap().matches, replacement);

    assert!(store.load_pairings("comp-2").unwrap().is_none());
}

#[test]
fn memory_store_replaces_whole_draw() {
    check_replace_semantics(&MemoryBracketStore::new());
}

#[test]
fn file_store_replaces_whole_draw() {
    let dir = temp_dir();
    let store = JsonFileBracketStore::open(&dir).unwrap();
    check_replace_semantics(&store);

    let files: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, vec!["comp-1.json".to_string()]);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unsafe_competition_ids_are_refused() {
    let dir = temp_dir();
    let file_store = JsonFileBracketStore::open(&dir).unwrap();
    let memory_store = MemoryBracketStore::new();
    let stores: [&dyn BracketStore; 2] = [&memory_store, &file_store];
    for store in stores {
        for id in ["", "../etc", "a/b", "a b"] {
            assert!(matches!(
                store.create_or_replace_pairings(id, &draw(2)),
                Err(StoreError::InvalidCompetitionId(_))
            ));
            assert!(matches!(
                store.load_pairings(id),
                Err(StoreError::InvalidCompetitionId(_))
            ));
        }
    }
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_file_write_surfaces_io_error_and_keeps_prior_draw() {
    let dir = temp_dir();
    let store = JsonFileBracketStore::open(&dir).unwrap();
    let prior = store.create_or_replace_pairings("comp", &draw(4)).unwrap();
    let held = store.create_or_replace_pairings("held", &draw(5)).unwrap();

    // A non-empty directory where the target file should go makes the rename fail.
    fs::create_dir_all(dir.join("comp-blocked.json").join("x")).unwrap();
    let err = store
        .create_or_replace_pairings("comp-blocked", &draw(8))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));

    let mut files: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(files, vec!["comp-blocked.json", "comp.json", "held.json"]);
    assert!(dir.join("comp-blocked.json").join("x").is_dir());

    assert_eq!(store.load_pairings("comp").unwrap(), Some(prior));
    assert_eq!(store.load_pairings("held").unwrap(), Some(held));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_draws_are_refused() {
    let store = MemoryBracketStore::new();
    let mut bracket = draw(4);
    bracket.matches[0].next_index = None;
    assert!(matches!(
        store.create_or_replace_pairings("comp", &bracket),
        Err(StoreError::Rejected(_))
    ));
    assert!(store.load_pairings("comp").unwrap().is_none());
}

#[test]
fn file_store_detects_record_for_another_competition() {
    let dir = temp_dir();
    let store = JsonFileBracketStore::open(&dir).unwrap();
    store.create_or_replace_pairings("first", &draw(5)).unwrap();
    fs::copy(dir.join("first.json"), dir.join("second.json")).unwrap();

    assert!(matches!(
        store.load_pairings("second"),
        Err(StoreError::Corrupt { .. })
    ));
    fs::remove_dir_all(&dir).unwrap();
}
