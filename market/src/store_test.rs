use super::*;

#[test]
fn read_json_returns_fallback_for_missing_key() {
    let store = MemoryStore::new();
    let value: Vec<String> = read_json(&store, "products", Vec::new());
    assert!(value.is_empty());
}

#[test]
fn read_json_returns_fallback_for_corrupt_value() {
    let store = MemoryStore::new();
    store.set_item("products", "{not json").expect("set");
    let value: Vec<u32> = read_json(&store, "products", vec![7]);
    assert_eq!(value, vec![7]);
}

#[test]
fn write_then_read_json() {
    let store = MemoryStore::new();
    write_json(&store, "nums", &[1, 2, 3]).expect("write");
    let value: Vec<u32> = read_json(&store, "nums", Vec::new());
    assert_eq!(value, vec![1, 2, 3]);
    assert_eq!(store.get_item("nums").expect("get").as_deref(), Some("[1,2,3]"));
}

#[test]
fn remove_item_is_idempotent() {
    let store = MemoryStore::new();
    store.set_item("currentUser", "sneha").expect("set");
    store.remove_item("currentUser").expect("remove");
    store.remove_item("currentUser").expect("remove again");
    assert_eq!(store.get_item("currentUser").expect("get"), None);
}

#[test]
fn quota_rejects_oversized_write_and_keeps_previous_value() {
    let store = MemoryStore::with_quota(16);
    store.set_item("k", "small").expect("fits");
    let err = write_json(&store, "k", &"x".repeat(64)).expect_err("should exceed quota");
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(store.get_item("k").expect("get").as_deref(), Some("small"));
}

#[test]
fn quota_counts_replaced_value_once() {
    let store = MemoryStore::with_quota(10);
    store.set_item("k", "12345678").expect("fits");
    store.set_item("k", "87654321").expect("replacing should still fit");
}

#[test]
fn storage_errors_surface_the_storage_notice() {
    let err = StoreError::Backend("denied".to_owned());
    assert_eq!(err.notice(), STORAGE_NOTICE);
}

#[test]
fn store_works_through_a_reference() {
    let store = MemoryStore::new();
    let by_ref = &store;
    write_json(&by_ref, "k", &true).expect("write");
    assert!(read_json(&store, "k", false));
}
