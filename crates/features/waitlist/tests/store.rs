#![cfg(feature = "server")]

use chrono::{DateTime, Duration, Utc};
use std::num::NonZeroUsize;
use whub_database::Database;
use whub_domain::account::WaitingListAccount;
use whub_domain::flags::Flag;
use whub_domain::removal::{Removal, RemovalReason};
use whub_waitlist::{WaitingList, WaitlistError, WaitlistStore};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

async fn connect(ns: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session(ns, "waitlist_db")
        .init()
        .await
        .expect("connect to mem://")
}

fn sample_list() -> WaitingList {
    let mut list = WaitingList::new("wl_store", "Autumn intake");
    list.define_flag(Flag {
        id: "flag_paid".to_owned(),
        name: "Paid deposit".to_owned(),
        position_group: None,
        display_in_table: true,
    });
    list.add_account(WaitingListAccount::new("acc_a", "Alice", t0()));
    list.add_account(WaitingListAccount::new("acc_b", "Bert", t0() + Duration::hours(1)));
    list
}

#[tokio::test]
async fn save_and_load_preserves_order_and_marks() {
    let store = WaitlistStore::new(connect("store_roundtrip").await);

    let mut list = sample_list();
    list.mark("acc_a", "flag_paid", t0() + Duration::hours(2)).unwrap();
    list.set_notes("acc_b", "second call pending").unwrap();
    store.save(&list).await.expect("save aggregate");

    let loaded = store.load("wl_store").await.expect("load aggregate");
    assert_eq!(loaded.name(), "Autumn intake");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.position_of("acc_a"), NonZeroUsize::new(1));
    assert_eq!(loaded.position_of("acc_b"), NonZeroUsize::new(2));
    assert!(loaded.is_marked("acc_a", "flag_paid"));
    assert_eq!(loaded.account("acc_b").unwrap().notes, "second call pending");
}

#[tokio::test]
async fn create_rejects_duplicate_ids() {
    let store = WaitlistStore::new(connect("store_create").await);

    let list = sample_list();
    store.create(&list).await.expect("create aggregate");

    let created = store.load("wl_store").await.expect("load created aggregate");
    assert_eq!(created.name(), "Autumn intake");
    assert_eq!(created.len(), 2);

    let err = store.create(&list).await.unwrap_err();
    assert!(matches!(err, WaitlistError::Database(_)), "second create must conflict");
}

#[tokio::test]
async fn load_unknown_list_is_not_found() {
    let store = WaitlistStore::new(connect("store_missing").await);

    let err = store.load("wl_absent").await.unwrap_err();
    assert!(matches!(err, WaitlistError::NotFound { .. }));
}

#[tokio::test]
async fn removal_persists_through_save() {
    let store = WaitlistStore::new(connect("store_removal").await);

    let mut list = sample_list();
    store.save(&list).await.expect("save aggregate");

    let removal = Removal::new(RemovalReason::NoLongerInterested, "admin_1", None);
    list.remove_account("acc_a", &removal, Utc::now()).unwrap();
    store.save(&list).await.expect("save after removal");

    let loaded = store.load("wl_store").await.expect("load aggregate");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.position_of("acc_a"), None);
    assert_eq!(loaded.position_of("acc_b"), NonZeroUsize::new(1));
}
