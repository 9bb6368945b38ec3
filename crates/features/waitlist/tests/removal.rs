use chrono::{DateTime, Utc};
use whub_domain::account::WaitingListAccount;
use whub_domain::removal::{Removal, RemovalReason};
use whub_waitlist::{WaitingList, WaitlistError};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn list_with_one() -> WaitingList {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.add_account(WaitingListAccount::new("acc_a", "Alice", t0()));
    list
}

#[test]
fn other_without_custom_reason_fails_without_mutation() {
    let mut list = list_with_one();

    for custom in [None, Some(String::new()), Some("   ".to_owned())] {
        let removal = Removal::new(RemovalReason::Other, "admin_1", custom);
        let result = list.remove_account("acc_a", &removal, Utc::now());
        assert!(matches!(result, Err(WaitlistError::Validation { .. })));
        assert_eq!(list.len(), 1, "failed removal must not mutate the list");
    }
}

#[test]
fn other_with_custom_reason_succeeds() {
    let mut list = list_with_one();
    let removal = Removal::new(RemovalReason::Other, "admin_1", Some("moved abroad".to_owned()));

    let event = list.remove_account("acc_a", &removal, Utc::now()).unwrap();
    assert_eq!(event.reason, RemovalReason::Other);
    assert_eq!(event.custom_reason.as_deref(), Some("moved abroad"));
    assert_eq!(event.actor, "admin_1");
    assert!(list.is_empty());
}

#[test]
fn double_removal_is_not_found() {
    let mut list = list_with_one();
    let removal = Removal::new(RemovalReason::Duplicate, "admin_1", None);

    list.remove_account("acc_a", &removal, Utc::now()).unwrap();
    let result = list.remove_account("acc_a", &removal, Utc::now());
    assert!(matches!(result, Err(WaitlistError::NotFound { .. })));
}
