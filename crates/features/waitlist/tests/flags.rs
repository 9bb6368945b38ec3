use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use whub_domain::account::WaitingListAccount;
use whub_domain::flags::Flag;
use whub_waitlist::{WaitingList, WaitlistError};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn manual_flag(id: &str, name: &str) -> Flag {
    Flag { id: id.to_owned(), name: name.to_owned(), position_group: None, display_in_table: true }
}

fn automatic_flag(id: &str, name: &str, group: &str) -> Flag {
    Flag {
        id: id.to_owned(),
        name: name.to_owned(),
        position_group: Some(group.to_owned()),
        display_in_table: true,
    }
}

fn list_with_flags() -> WaitingList {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.define_flag(manual_flag("flag_paid", "Paid deposit"));
    list.define_flag(manual_flag("flag_docs", "Documents complete"));
    list.define_flag(automatic_flag("flag_group_a", "Group A", "group_a"));
    list.add_account(WaitingListAccount::new("acc_a", "Alice", t0()));
    list
}

#[test]
fn manual_flags_exclude_position_groups() {
    let list = list_with_flags();
    let manual: Vec<_> = list.manual_flags().map(|flag| flag.id.as_str()).collect();
    assert_eq!(manual, ["flag_paid", "flag_docs"]);
}

#[test]
fn mark_and_unmark_round_trip() {
    let mut list = list_with_flags();
    assert!(!list.is_marked("acc_a", "flag_paid"));

    list.mark("acc_a", "flag_paid", Utc::now()).unwrap();
    assert!(list.is_marked("acc_a", "flag_paid"));

    // Idempotent in both directions.
    list.mark("acc_a", "flag_paid", Utc::now()).unwrap();
    assert!(list.is_marked("acc_a", "flag_paid"));

    list.unmark("acc_a", "flag_paid").unwrap();
    list.unmark("acc_a", "flag_paid").unwrap();
    assert!(!list.is_marked("acc_a", "flag_paid"));
}

#[test]
fn unknown_flag_or_account_is_rejected() {
    let mut list = list_with_flags();
    assert!(matches!(
        list.mark("acc_a", "flag_missing", Utc::now()),
        Err(WaitlistError::NotFound { .. })
    ));
    assert!(matches!(
        list.mark("acc_missing", "flag_paid", Utc::now()),
        Err(WaitlistError::NotFound { .. })
    ));
}

#[test]
fn manual_edits_treat_missing_entries_as_unmark() {
    let mut list = list_with_flags();
    list.mark("acc_a", "flag_paid", Utc::now()).unwrap();
    list.mark("acc_a", "flag_docs", Utc::now()).unwrap();

    // Only flag_docs requested; flag_paid must be unmarked.
    let desired: BTreeMap<String, bool> = [("flag_docs".to_owned(), true)].into();
    list.apply_manual_edits("acc_a", &desired, Utc::now()).unwrap();

    assert!(!list.is_marked("acc_a", "flag_paid"));
    assert!(list.is_marked("acc_a", "flag_docs"));
}

#[test]
fn manual_edits_never_touch_automatic_flags() {
    let mut list = list_with_flags();
    list.mark("acc_a", "flag_group_a", Utc::now()).unwrap();

    // The automatic flag appears in the input but must keep its state.
    let desired: BTreeMap<String, bool> = [("flag_group_a".to_owned(), false)].into();
    list.apply_manual_edits("acc_a", &desired, Utc::now()).unwrap();
    assert!(list.is_marked("acc_a", "flag_group_a"));

    // Absent from the input: still untouched, not unmarked.
    list.apply_manual_edits("acc_a", &BTreeMap::new(), Utc::now()).unwrap();
    assert!(list.is_marked("acc_a", "flag_group_a"));
}

#[test]
fn manual_edits_resync_the_assignment_set() {
    let mut list = list_with_flags();
    list.apply_manual_edits("acc_a", &BTreeMap::new(), Utc::now()).unwrap();

    let member = list.account("acc_a").unwrap();
    let mut pivots: Vec<_> =
        member.assignments.iter().map(|pivot| pivot.flag_id.as_str()).collect();
    pivots.sort_unstable();
    assert_eq!(pivots, ["flag_docs", "flag_group_a", "flag_paid"]);
}
