use chrono::{DateTime, Utc};
use whub_domain::account::WaitingListAccount;
use whub_domain::constants::{CHECK_CTS_THEORY_EXAM, DISPLAY_ON_ROSTER};
use whub_domain::flags::Flag;
use whub_waitlist::{Roster, WaitingList};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn sample_list() -> WaitingList {
    let mut list = WaitingList::new("wl1", "Spring intake");
    list.define_flag(Flag {
        id: "flag_paid".to_owned(),
        name: "Paid deposit".to_owned(),
        position_group: None,
        display_in_table: true,
    });
    list.define_flag(Flag {
        id: "flag_hidden".to_owned(),
        name: "Internal only".to_owned(),
        position_group: None,
        display_in_table: false,
    });
    list.define_flag(Flag {
        id: "flag_group_a".to_owned(),
        name: "Group A".to_owned(),
        position_group: Some("group_a".to_owned()),
        display_in_table: true,
    });

    let mut alice = WaitingListAccount::new("acc_a", "Alice", t0());
    alice.theory_exam_passed = true;
    alice.on_roster = true;
    alice.notes = "called twice".to_owned();
    list.add_account(alice);
    list
}

#[test]
fn fields_come_from_displayable_flags_only() {
    let roster = Roster::project(&sample_list());

    let keys: Vec<_> = roster.fields.iter().map(|field| field.key.as_str()).collect();
    // Position-group flags are displayable, just not editable.
    assert_eq!(keys, ["flag_paid", "flag_group_a"]);
    assert_eq!(roster.fields[0].label, "Paid deposit");
}

#[test]
fn entries_carry_position_and_mark_states() {
    let mut list = sample_list();
    list.mark("acc_a", "flag_paid", Utc::now()).unwrap();

    let roster = Roster::project(&list);
    assert_eq!(roster.list_id, "wl1");
    assert_eq!(roster.entries.len(), 1);

    let entry = &roster.entries[0];
    assert_eq!(entry.position, 1);
    assert_eq!(entry.name, "Alice");
    assert_eq!(entry.notes, "called twice");
    assert_eq!(entry.theory_exam_passed, Some(true));
    assert_eq!(entry.on_roster, Some(true));
    assert_eq!(entry.flags.get("flag_paid"), Some(&true));
    assert_eq!(entry.flags.get("flag_group_a"), Some(&false));
    assert!(!entry.flags.contains_key("flag_hidden"));
}

#[test]
fn toggles_hide_derived_columns() {
    let mut list = sample_list();
    list.feature_toggles_mut().set(CHECK_CTS_THEORY_EXAM, false);
    list.feature_toggles_mut().set(DISPLAY_ON_ROSTER, false);

    let roster = Roster::project(&list);
    let entry = &roster.entries[0];
    assert_eq!(entry.theory_exam_passed, None);
    assert_eq!(entry.on_roster, None);
}
