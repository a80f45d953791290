use taskdeck_core::{
    decode_tasks, encode_tasks, KvStore, KvTaskRepository, MemoryKvStore, SqliteKvStore,
    TaskList, TaskRepository, TASKS_KEY, TOTAL_COMPLETED_KEY,
};

#[test]
fn sqlite_kv_store_reads_back_and_overwrites() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();
    assert_eq!(store.get_item("missing").unwrap(), None);

    store.set_item("k", "one").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("one"));

    store.set_item("k", "two").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let list = TaskList::new().with_added("Read book").with_added("Write essay");
    {
        let mut repo = KvTaskRepository::new(SqliteKvStore::open(&path).unwrap());
        repo.save_tasks(&list).unwrap();
        repo.save_total_completed(7).unwrap();
    }

    let repo = KvTaskRepository::new(SqliteKvStore::open(&path).unwrap());
    assert_eq!(repo.load_tasks().unwrap(), list);
    assert_eq!(repo.load_total_completed().unwrap(), 7);
}

#[test]
fn absent_keys_load_as_defaults() {
    let repo = KvTaskRepository::new(MemoryKvStore::new());
    assert!(repo.load_tasks().unwrap().is_empty());
    assert_eq!(repo.load_total_completed().unwrap(), 0);
}

#[test]
fn persisted_layout_matches_key_value_contract() {
    let list = TaskList::new().with_added("Read book");
    let id = list.as_slice()[0].id;
    let mut repo = KvTaskRepository::new(MemoryKvStore::new());
    repo.save_tasks(&list).unwrap();
    repo.save_total_completed(3).unwrap();

    let tasks: serde_json::Value =
        serde_json::from_str(repo.store().raw(TASKS_KEY).unwrap()).unwrap();
    assert_eq!(
        tasks,
        serde_json::json!([{ "id": id.to_string(), "text": "Read book", "completed": false }])
    );
    assert_eq!(repo.store().raw(TOTAL_COMPLETED_KEY), Some("3"));
}

#[test]
fn malformed_tasks_fall_back_to_empty_and_stay_stored() {
    let store = MemoryKvStore::with_entries([(TASKS_KEY, "{not json")]);
    let repo = KvTaskRepository::new(store);

    assert!(repo.load_tasks().unwrap().is_empty());
    assert_eq!(repo.store().raw(TASKS_KEY), Some("{not json"));
}

#[test]
fn malformed_counter_falls_back_to_zero() {
    for raw in ["\"seven\"", "-1", "2.5", ""] {
        let repo = KvTaskRepository::new(MemoryKvStore::with_entries([(TOTAL_COMPLETED_KEY, raw)]));
        assert_eq!(repo.load_total_completed().unwrap(), 0, "raw value {raw:?}");
    }
}

#[test]
fn duplicate_ids_are_dropped_on_load() {
    let raw = r#"[
        {"id": "0b7e3f7a-5d1c-4a4e-9a3b-2f1f3c9d8e01", "text": "first", "completed": false},
        {"id": "0b7e3f7a-5d1c-4a4e-9a3b-2f1f3c9d8e01", "text": "second", "completed": true},
        {"id": "5c2d9b61-7f3a-4e1b-8c0d-9a8b7c6d5e4f", "text": "third", "completed": true}
    ]"#;
    let repo = KvTaskRepository::new(MemoryKvStore::with_entries([(TASKS_KEY, raw)]));

    let tasks = repo.load_tasks().unwrap();
    let texts: Vec<_> = tasks.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "third"]);
}

#[test]
fn codec_round_trip_preserves_order_and_fields() {
    let list = TaskList::new()
        .with_added("a")
        .with_added("b")
        .with_added("c");
    let second = list.as_slice()[1].id;
    let list = list.with_toggled(second);

    let decoded = decode_tasks(&encode_tasks(&list).unwrap()).unwrap();
    assert_eq!(decoded, list);
    assert!(decoded.get(second).unwrap().completed);
}
