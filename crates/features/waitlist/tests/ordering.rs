use chrono::{DateTime, Duration, Utc};
use std::num::NonZeroUsize;
use whub_domain::account::WaitingListAccount;
use whub_domain::removal::{Removal, RemovalReason};
use whub_waitlist::WaitingList;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn list_with_three() -> WaitingList {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.add_account(WaitingListAccount::new("acc_a", "Alice", t0()));
    list.add_account(WaitingListAccount::new("acc_b", "Bert", t0() + Duration::hours(1)));
    list.add_account(WaitingListAccount::new("acc_c", "Cora", t0() + Duration::hours(2)));
    list
}

#[test]
fn positions_are_one_based_and_ordered_by_join_time() {
    let list = list_with_three();

    assert_eq!(list.len(), 3);
    assert_eq!(list.position_of("acc_a"), NonZeroUsize::new(1));
    assert_eq!(list.position_of("acc_b"), NonZeroUsize::new(2));
    assert_eq!(list.position_of("acc_c"), NonZeroUsize::new(3));
    assert_eq!(list.position_of("acc_x"), None);
}

#[test]
fn insertion_order_is_independent_of_add_order() {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.add_account(WaitingListAccount::new("acc_c", "Cora", t0() + Duration::hours(2)));
    list.add_account(WaitingListAccount::new("acc_a", "Alice", t0()));
    list.add_account(WaitingListAccount::new("acc_b", "Bert", t0() + Duration::hours(1)));

    let order: Vec<_> = list.accounts().map(|member| member.account_id.as_str()).collect();
    assert_eq!(order, ["acc_a", "acc_b", "acc_c"]);
}

#[test]
fn ties_keep_admission_order() {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.add_account(WaitingListAccount::new("acc_first", "First", t0()));
    list.add_account(WaitingListAccount::new("acc_second", "Second", t0()));
    list.add_account(WaitingListAccount::new("acc_third", "Third", t0()));

    let order: Vec<_> = list.accounts().map(|member| member.account_id.as_str()).collect();
    assert_eq!(order, ["acc_first", "acc_second", "acc_third"]);
}

#[test]
fn positions_agree_with_iteration_order() {
    let list = list_with_three();

    for (index, member) in list.accounts().enumerate() {
        assert_eq!(list.position_of(&member.account_id), NonZeroUsize::new(index + 1));
    }
}

#[test]
fn removal_re_ranks_later_members() {
    let mut list = list_with_three();
    let removal = Removal::new(RemovalReason::Inactivity, "admin_1", None);

    let event = list.remove_account("acc_b", &removal, Utc::now()).unwrap();
    assert_eq!(event.account_id, "acc_b");
    assert_eq!(event.waitlist_id, "wl1");

    assert_eq!(list.len(), 2);
    assert_eq!(list.position_of("acc_b"), None);
    assert_eq!(list.position_of("acc_a"), NonZeroUsize::new(1));
    assert_eq!(list.position_of("acc_c"), NonZeroUsize::new(2));
}
