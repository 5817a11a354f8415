//! High-score table persistence

use std::path::PathBuf;

use tera_tetris::scores::{
    insert_ranked, HighScoreRecord, JsonFileStore, MemoryStore, ScoreStore, DEFAULT_PLAYER_NAME,
    MAX_RECORDS,
};

fn temp_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir()
        .join(format!("tera_tetris_scores_{tag}_{nanos}"))
        .join("tera_highscores_v1.json")
}

fn record(name: &str, score: u32) -> HighScoreRecord {
    HighScoreRecord {
        name: name.to_string(),
        score,
        date: 0,
    }
}

#[test]
fn test_missing_file_is_empty_table() {
    let store = JsonFileStore::new(temp_path("missing"));
    assert!(store.load_top_scores().is_empty());
    assert!(store.best().is_none());
}

#[test]
fn test_submit_persists_ranked_table() {
    let path = temp_path("ranked");
    let mut store = JsonFileStore::new(&path);

    store.submit_score("ada", 300).unwrap();
    store.submit_score("bob", 1200).unwrap();
    let list = store.submit_score("cy", 40).unwrap();

    let scores: Vec<u32> = list.iter().map(|r| r.score).collect();
    assert_eq!(scores, [1200, 300, 40]);

    // A second store over the same file sees the same table.
    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.load_top_scores(), list);
    assert_eq!(reopened.best().map(|r| r.name), Some("bob".to_string()));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_table_keeps_top_ten() {
    let path = temp_path("top10");
    let mut store = JsonFileStore::new(&path);
    for score in 1..=15 {
        store.submit_score("p", score * 10).unwrap();
    }
    let list = store.load_top_scores();
    assert_eq!(list.len(), MAX_RECORDS);
    assert_eq!(list.first().map(|r| r.score), Some(150));
    assert_eq!(list.last().map(|r| r.score), Some(60));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_blank_name_becomes_default() {
    let mut store = MemoryStore::new();
    let list = store.submit_score("   ", 10).unwrap();
    assert_eq!(list[0].name, DEFAULT_PLAYER_NAME);
}

#[test]
fn test_corrupt_file_reads_as_empty() {
    let path = temp_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = JsonFileStore::new(&path);
    assert!(store.load_top_scores().is_empty());

    // Submitting overwrites the corrupt table.
    let list = store.submit_score("ada", 5).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(store.load_top_scores().len(), 1);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_clear_removes_table() {
    let path = temp_path("clear");
    let mut store = JsonFileStore::new(&path);
    store.submit_score("ada", 5).unwrap();
    store.clear().unwrap();
    assert!(store.load_top_scores().is_empty());
    // Clearing twice is fine.
    store.clear().unwrap();

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_equal_scores_keep_submission_order() {
    let mut list = vec![record("first", 100)];
    insert_ranked(&mut list, record("second", 100));
    insert_ranked(&mut list, record("top", 200));
    let names: Vec<&str> = list.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["top", "first", "second"]);
}

#[test]
fn test_file_format_is_json_array() {
    let path = temp_path("format");
    let mut store = JsonFileStore::new(&path);
    store.submit_score("ada", 42).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().expect("array")[0];
    assert_eq!(first["name"], "ada");
    assert_eq!(first["score"], 42);
    assert!(first["date"].is_u64());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
