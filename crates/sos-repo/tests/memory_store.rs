#![cfg(feature = "memory")]

use sos_repo::memory::InMemoryStore;
use sos_types::domain::order::OrderDraft;
use sos_types::ports::order_store::OrderStore;

fn sample_draft() -> OrderDraft {
    let mut draft = OrderDraft::new();
    draft
        .set("name", "A")
        .set("address", "1 St")
        .set("city", "X")
        .set("state", "CA")
        .set("zipcode", "90001")
        .set("dueDate", "12/31/2099")
        .set("productType", "Guitar");
    draft
}

#[tokio::test]
async fn insert_get_list_flow() {
    let store = InMemoryStore::new();

    let first = store.insert(&sample_draft()).await.unwrap();
    assert_eq!(first.record_id, 1);
    assert_eq!(first.id, "1");

    let fetched = store.get(1).await.unwrap().unwrap();
    assert_eq!(fetched, first);

    let second = store.insert(&sample_draft()).await.unwrap();
    assert_eq!(second.record_id, 2);

    let ids: Vec<i64> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|o| o.record_id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn missing_rows_and_empty_store() {
    let store = InMemoryStore::new();
    assert!(store.get(1).await.unwrap().is_none());
    assert!(store.list().await.unwrap().is_empty());
}
