//! Tests for the user directory store.

use std::collections::HashSet;

use super::*;
use crate::domain::UserForm;
use crate::test_support::FixedClock;
use rstest::{fixture, rstest};

const NOW_MILLIS: i64 = 1_767_225_600_000; // 2026-01-01T00:00:00Z

fn page_size(value: usize) -> PageSize {
    PageSize::new(value).expect("non-zero page size")
}

fn draft(name: &str, email: &str, phone: &str) -> UserDraft {
    UserDraft::try_from(UserForm {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        role: Role::User,
    })
    .expect("valid form")
}

#[fixture]
fn directory() -> UserDirectory {
    UserDirectory::seeded(Arc::new(FixedClock::at_millis(NOW_MILLIS)), page_size(10))
}

#[rstest]
fn seeds_five_users_on_first_page(directory: UserDirectory) {
    assert_eq!(directory.len(), 5);
    assert_eq!(directory.cursor().current_page(), 1);
    assert_eq!(directory.visible_records().len(), 5);
    assert!(directory.editing_record().is_none());
}

#[rstest]
fn add_appends_with_unique_id_and_today(mut directory: UserDirectory) {
    let existing: HashSet<UserId> = directory.records().iter().map(UserRecord::id).collect();

    let added = directory.add(draft("Ada", "ada@example.com", "13900000000"));

    assert_eq!(directory.len(), 6);
    assert!(!existing.contains(&added.id()));
    assert_eq!(added.id(), UserId::new(NOW_MILLIS));
    assert_eq!(
        added.create_time(),
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
    );
    assert_eq!(directory.records().last(), Some(&added));
}

#[rstest]
fn adds_in_the_same_millisecond_get_distinct_ids(mut directory: UserDirectory) {
    let first = directory.add(draft("Ada", "ada@example.com", "13900000000"));
    let second = directory.add(draft("Ada", "ada@example.com", "13900000000"));

    assert_ne!(first.id(), second.id());
    assert_eq!(directory.len(), 7, "duplicates are permitted");
}

#[test]
fn ids_stay_ahead_of_a_clock_running_behind() {
    let mut directory = UserDirectory::seeded(Arc::new(FixedClock::at_millis(0)), page_size(10));
    let added = directory.add(draft("Ada", "ada@example.com", "13900000000"));
    assert_eq!(added.id(), UserId::new(6));
}

#[test]
fn ids_are_not_reused_after_deleting_the_newest() {
    let mut directory = UserDirectory::new(Arc::new(FixedClock::at_millis(100)), page_size(10));
    let first = directory.add(draft("Ada", "ada@example.com", "13900000000"));
    directory.delete(first.id());
    let second = directory.add(draft("Ada", "ada@example.com", "13900000000"));
    assert_ne!(first.id(), second.id());
}

#[rstest]
fn delete_removes_exactly_the_matching_record(mut directory: UserDirectory) {
    assert_eq!(directory.delete(UserId::new(3)), 1);
    assert_eq!(directory.len(), 4);
    assert!(directory.find(UserId::new(3)).is_none());
}

#[rstest]
fn delete_of_unknown_id_is_a_no_op(mut directory: UserDirectory) {
    assert_eq!(directory.delete(UserId::new(99)), 0);
    assert_eq!(directory.len(), 5);
}

#[rstest]
fn update_changes_only_patched_fields(mut directory: UserDirectory) {
    let before = directory.find(UserId::new(2)).cloned().expect("seed user");

    let updated = directory
        .update(
            UserId::new(2),
            UserPatch {
                email: Some("li.si@example.com".to_owned()),
                ..UserPatch::default()
            },
        )
        .cloned()
        .expect("record exists");

    assert_eq!(updated.email(), "li.si@example.com");
    assert_eq!(updated.name(), before.name());
    assert_eq!(updated.phone(), before.phone());
    assert_eq!(updated.role(), before.role());
    assert_eq!(updated.create_time(), before.create_time());
}

#[rstest]
fn update_of_unknown_id_is_a_no_op(mut directory: UserDirectory) {
    let before = directory.records().to_vec();
    let result = directory.update(
        UserId::new(42),
        UserPatch {
            name: Some("ghost".to_owned()),
            ..UserPatch::default()
        },
    );
    assert!(result.is_none());
    assert_eq!(directory.records(), before.as_slice());
}

#[rstest]
fn search_for_zhang_finds_only_zhangsan(mut directory: UserDirectory) {
    directory.set_search_keyword("zhang");

    let visible = directory.visible_records();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible.first().map(UserRecord::email), Some("zhangsan@example.com"));
}

#[rstest]
#[case::uppercase_email("ZHAOLIU", &[4])]
#[case::chinese_name("王五", &[3])]
#[case::phone_suffix("138005", &[5])]
#[case::shared_domain("example.com", &[1, 2, 3, 4, 5])]
#[case::blank_matches_all("   ", &[1, 2, 3, 4, 5])]
#[case::no_match("nobody", &[])]
fn search_filters_name_email_and_phone(
    mut directory: UserDirectory,
    #[case] keyword: &str,
    #[case] expected: &[i64],
) {
    directory.set_search_keyword(keyword);
    let ids: Vec<i64> = directory
        .visible_records()
        .iter()
        .map(|user| user.id().get())
        .collect();
    assert_eq!(ids, expected);
}

#[rstest]
fn keyword_and_page_size_rewind_to_first_page(mut directory: UserDirectory) {
    directory.set_current_page(3);
    directory.set_search_keyword("li");
    assert_eq!(directory.cursor().current_page(), 1);

    directory.set_current_page(2);
    directory.set_page_size(page_size(5));
    assert_eq!(directory.cursor().current_page(), 1);
    assert_eq!(directory.cursor().page_size().get(), 5);
}

#[rstest]
fn second_page_of_ten_is_empty_for_five_users(mut directory: UserDirectory) {
    directory.set_page_size(page_size(10));
    directory.set_current_page(2);
    assert!(directory.visible_records().is_empty());
}

#[rstest]
fn page_zero_is_empty_rather_than_an_error(mut directory: UserDirectory) {
    directory.set_current_page(0);
    assert!(directory.visible_records().is_empty());
}

#[rstest]
#[case(1, 2, &[1, 2])]
#[case(2, 2, &[3, 4])]
#[case(3, 2, &[5])]
#[case(4, 2, &[])]
fn pages_slice_the_filtered_set(
    mut directory: UserDirectory,
    #[case] page: usize,
    #[case] size: usize,
    #[case] expected: &[i64],
) {
    directory.set_page_size(page_size(size));
    directory.set_current_page(page);
    let ids: Vec<i64> = directory
        .visible_records()
        .iter()
        .map(|user| user.id().get())
        .collect();
    assert_eq!(ids, expected);
}

#[rstest]
fn visible_records_never_exceed_page_size(mut directory: UserDirectory) {
    for n in 0..20 {
        directory.add(draft(&format!("user{n}"), "u@example.com", "13700000000"));
    }
    for size in [1, 3, 7, 10] {
        directory.set_page_size(page_size(size));
        for page in 0..=10 {
            directory.set_current_page(page);
            let visible = directory.visible_records();
            assert!(visible.len() <= size);
            let filtered = directory.filtered();
            assert!(visible.iter().all(|user| filtered.contains(&user)));
        }
    }
}

#[rstest]
fn view_reports_pager_metadata(mut directory: UserDirectory) {
    directory.set_page_size(page_size(2));
    directory.set_search_keyword("i");
    directory.set_current_page(2);

    let view = directory.view();
    // only lisi, zhaoliu and qianqi contain an "i"
    assert_eq!(view.total, 5);
    assert_eq!(view.filtered_total, 3);
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.current_page, 2);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items.first().map(UserRecord::email), Some("qianqi@example.com"));
    assert_eq!(view.search_keyword, "i");
}

#[rstest]
fn deleting_last_row_on_a_later_page_steps_back(mut directory: UserDirectory) {
    directory.set_page_size(page_size(2));
    directory.set_current_page(3);
    assert_eq!(directory.visible_records().len(), 1);

    assert_eq!(directory.delete_visible(UserId::new(5)), 1);
    assert_eq!(directory.cursor().current_page(), 2);
}

#[rstest]
fn deleting_on_first_page_keeps_page(mut directory: UserDirectory) {
    directory.set_search_keyword("zhang");
    assert_eq!(directory.delete_visible(UserId::new(1)), 1);
    assert_eq!(directory.cursor().current_page(), 1);
}

#[rstest]
fn editing_record_is_advisory(mut directory: UserDirectory) {
    let record = directory.find(UserId::new(2)).cloned();
    directory.set_editing_record(record.clone());
    assert_eq!(directory.editing_record(), record.as_ref());

    directory.delete(UserId::new(2));
    assert_eq!(directory.editing_record(), record.as_ref());

    directory.clear_editing_record();
    assert!(directory.editing_record().is_none());
}
