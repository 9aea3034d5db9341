//! Grouping tests: deduplication, ordering and derived text of newsletter items.
//!
//! Covers both priority schemes, unranked mandatees, tie-breaks on agenda
//! position and the proposal sentence built from sponsoring mandatees.

mod common;

use std::collections::HashSet;

use newsletter_service::models::newsletter::*;
use common::*;

fn ids(items: &[GroupedNewsletterItem]) -> Vec<&str> {
    items.iter().map(|i| i.newsletter_id.as_str()).collect()
}

#[test]
fn test_empty_input_gives_empty_output() {
    assert!(group(&[], PriorityScheme::Numeric).is_empty());
    assert!(group(&[], PriorityScheme::Alphanumeric).is_empty());
}

#[test]
fn test_one_item_per_distinct_newsletter() {
    let records = vec![
        record("n1", Some("1"), Some("Minister-president"), Some("Jan")),
        record("n2", Some("2"), Some("Minister B"), Some("Eva")),
        record("n1", Some("2"), Some("Minister B"), Some("Eva")),
        record("n3", Some("3"), Some("Minister C"), None),
        record("n1", Some("3"), Some("Minister C"), None),
    ];
    for scheme in [PriorityScheme::Numeric, PriorityScheme::Alphanumeric] {
        let items = group(&records, scheme);
        assert_eq!(items.len(), 3);
        let unique: HashSet<&str> = ids(&items).into_iter().collect();
        assert_eq!(unique.len(), 3);
        let n1 = items.iter().find(|i| i.newsletter_id == "n1").expect("n1 present");
        assert_eq!(n1.mandatees.len(), 3);
    }
}

#[test]
fn test_output_is_sorted_by_group_priority_then_position() {
    let records = vec![
        with_position(record("late", Some("2"), Some("B"), Some("B")), 1),
        with_position(record("second", Some("1"), Some("A"), Some("A")), 7),
        with_position(record("first", Some("1"), Some("A"), Some("A")), 3),
        record("unpositioned", Some("1"), Some("A"), Some("A")),
    ];
    for scheme in [PriorityScheme::Numeric, PriorityScheme::Alphanumeric] {
        let items = group(&records, scheme);
        assert_eq!(ids(&items), vec!["first", "second", "unpositioned", "late"]);
        for pair in items.windows(2) {
            assert!(pair[0].group_priority <= pair[1].group_priority);
        }
    }
}

#[test]
fn test_composite_numeric_key_sorts_after_single_rank() {
    let records = vec![
        record("pair", Some("1"), Some("A"), Some("A")),
        record("pair", Some("2"), Some("B"), Some("B")),
        record("single", Some("1"), Some("A"), Some("A")),
    ];
    let items = group(&records, PriorityScheme::Numeric);
    assert_eq!(ids(&items), vec!["single", "pair"]);
    assert_eq!(items[0].group_priority, GroupPriority::Numeric(1.0));
    match items[1].group_priority {
        GroupPriority::Numeric(key) => assert!((key - 1.02).abs() < 1e-9, "unexpected key {key}"),
        ref other => panic!("expected a numeric key, got {other}"),
    }
}

#[test]
fn test_unranked_items_sort_last_numeric() {
    let records = vec![
        record("unranked", None, Some("Minister Z"), Some("Zoë")),
        record("ranked", Some("9"), Some("Minister Y"), Some("Yves")),
        record("garbage", Some("n/a"), Some("Minister X"), Some("Xavier")),
    ];
    let items = group(&records, PriorityScheme::Numeric);
    assert_eq!(items[0].newsletter_id, "ranked");
    assert_eq!(
        items[1].group_priority,
        GroupPriority::Numeric(MISSING_NUMERIC_GROUP_PRIORITY)
    );
    assert_eq!(
        items[2].group_priority,
        GroupPriority::Numeric(MISSING_NUMERIC_GROUP_PRIORITY)
    );
}

#[test]
fn test_unranked_items_sort_last_alphanumeric() {
    let records = vec![
        record("unranked", None, Some("Minister Z"), Some("Zoë")),
        record("ranked", Some("26"), Some("Minister Y"), Some("Yves")),
    ];
    let items = group(&records, PriorityScheme::Alphanumeric);
    assert_eq!(ids(&items), vec!["ranked", "unranked"]);
    assert_eq!(items[0].group_priority, GroupPriority::Alphanumeric("Z".to_string()));
    assert_eq!(
        items[1].group_priority,
        GroupPriority::Alphanumeric(MISSING_LETTER_PRIORITY.to_string())
    );
}

#[test]
fn test_alphanumeric_key_joins_distinct_letters() {
    let records = vec![
        record("n1", Some("3"), Some("C"), Some("C")),
        record("n1", Some("1"), Some("A"), Some("A")),
        record("n1", Some("1"), Some("A"), Some("A")),
    ];
    let items = group(&records, PriorityScheme::Alphanumeric);
    assert_eq!(items[0].group_priority, GroupPriority::Alphanumeric("A,C".to_string()));
}

#[test]
fn test_proposal_text_lists_mandatees_by_priority() {
    let records = vec![
        record("n1", Some("3"), Some("Minister Z"), Some("Eva")),
        record("n1", Some("1"), Some("Minister-president"), Some("Jan")),
        record("n1", Some("2"), Some("Minister X"), None),
    ];
    let items = group(&records, PriorityScheme::Numeric);
    assert_eq!(items[0].proposal_text, "Op voorstel van Jan, Minister X en Eva");
    assert_eq!(items[0].group_name, "Minister-president,Minister X,Minister Z");
}

#[test]
fn test_duplicate_mandatee_rows_are_named_once() {
    let records = vec![
        record("n1", Some("1"), Some("Minister-president"), Some("Jan")),
        record("n1", Some("1"), Some("Minister-president"), Some("Jan")),
        record("n1", Some("2"), Some("Minister B"), Some("Eva")),
    ];
    let items = group(&records, PriorityScheme::Alphanumeric);
    assert_eq!(items[0].proposal_text, "Op voorstel van Jan en Eva");
}

#[test]
fn test_unnamed_mandatee_voids_proposal_text() {
    let records = vec![
        record("n1", Some("1"), Some("Minister-president"), Some("Jan")),
        record("n1", Some("2"), None, None),
    ];
    let items = group(&records, PriorityScheme::Numeric);
    assert_eq!(items[0].proposal_text, "");
}

#[test]
fn test_item_fields_come_from_first_record() {
    let mut first = with_themes(record("n1", Some("1"), Some("A"), Some("A")), "Economie");
    first.title = Some("Eerste titel".to_string());
    let mut later = record("n1", Some("2"), Some("B"), Some("B"));
    later.title = Some("Andere titel".to_string());

    let items = group(&[first, later], PriorityScheme::Alphanumeric);
    assert_eq!(items[0].title.as_deref(), Some("Eerste titel"));
    assert_eq!(items[0].themes.as_deref(), Some("Economie"));
}

#[test]
fn test_grouping_is_deterministic() {
    let records = vec![
        record("b", Some("2"), Some("B"), Some("B")),
        record("a", Some("2"), Some("B"), Some("B")),
        record("c", None, Some("C"), Some("C")),
        record("a", Some("1"), Some("A"), Some("A")),
    ];
    let first = group(&records, PriorityScheme::Alphanumeric);
    let second = group(&records, PriorityScheme::Alphanumeric);
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(ids(&first), vec!["a", "b", "c"]);
}

fn partly_ranked_records() -> Vec<RawDecisionRecord> {
    vec![
        with_position(record("mixed", Some("1"), Some("A"), Some("A")), 1),
        with_position(record("mixed", None, Some("Z"), Some("Z")), 1),
        with_position(record("single", Some("1"), Some("A"), Some("A")), 2),
        with_position(record("pair", Some("1"), Some("A"), Some("A")), 3),
        with_position(record("pair", Some("2"), Some("B"), Some("B")), 3),
    ]
}

#[test]
fn test_numeric_key_ignores_unranked_mandatee() {
    let items = group(&partly_ranked_records(), PriorityScheme::Numeric);
    assert_eq!(ids(&items), vec!["mixed", "single", "pair"]);
    assert_eq!(items[0].group_priority, GroupPriority::Numeric(1.0));
}

#[test]
fn test_alphanumeric_key_keeps_sentinel_for_unranked_mandatee() {
    let items = group(&partly_ranked_records(), PriorityScheme::Alphanumeric);
    assert_eq!(ids(&items), vec!["single", "pair", "mixed"]);
    assert_eq!(
        items[2].group_priority,
        GroupPriority::Alphanumeric(format!("A,{MISSING_LETTER_PRIORITY}"))
    );
}
