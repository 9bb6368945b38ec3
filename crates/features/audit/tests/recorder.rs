#![cfg(feature = "server")]

use chrono::Utc;
use std::time::Duration;
use whub_audit::{AuditStore, init};
use whub_database::Database;
use whub_domain::events::AccountRemoved;
use whub_domain::removal::RemovalReason;
use whub_event_bus::EventBus;

async fn connect(ns: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session(ns, "audit_db")
        .init()
        .await
        .expect("connect to mem://")
}

fn removed_event(account_id: &str) -> AccountRemoved {
    AccountRemoved {
        waitlist_id: "wl_audit".to_owned(),
        account_id: account_id.to_owned(),
        reason: RemovalReason::Other,
        actor: "admin_1".to_owned(),
        custom_reason: Some("moved abroad".to_owned()),
        removed_at: Utc::now(),
    }
}

async fn wait_for_records(
    store: &AuditStore,
    waitlist_id: &str,
    expected: usize,
) -> Vec<whub_audit::RemovalRecord> {
    for _ in 0..50 {
        let records = store.removals_for(waitlist_id).await.expect("query removals");
        if records.len() >= expected {
            return records;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("recorder did not persist {expected} record(s) in time");
}

#[tokio::test]
async fn recorder_persists_published_events() {
    let db = connect("audit_recorder").await;
    let events = EventBus::new();
    let _slice = init(db.clone(), &events).expect("init audit slice");

    events.publish_mpsc(removed_event("acc_a")).expect("queue event");

    let store = AuditStore::new(db);
    let records = wait_for_records(&store, "wl_audit", 1).await;
    assert_eq!(records[0].account_id, "acc_a");
    assert_eq!(records[0].reason, "other");
    assert_eq!(records[0].actor, "admin_1");
    assert_eq!(records[0].custom_reason.as_deref(), Some("moved abroad"));
    assert!(records[0].removed_at_utc().is_some());
}

#[tokio::test]
async fn history_is_scoped_per_list() {
    let db = connect("audit_scoped").await;
    let store = AuditStore::new(db);

    let mut other_list = removed_event("acc_b");
    other_list.waitlist_id = "wl_other".to_owned();

    store.record_removal(&removed_event("acc_a")).await.expect("record first");
    store.record_removal(&other_list).await.expect("record second");

    let records = store.removals_for("wl_audit").await.expect("query removals");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].account_id, "acc_a");
}

#[tokio::test]
async fn queue_can_only_be_claimed_once() {
    let db = connect("audit_single").await;
    let events = EventBus::new();

    init(db.clone(), &events).expect("first init");
    assert!(init(db, &events).is_err(), "second recorder must not start");
}
