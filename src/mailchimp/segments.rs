use super::types::{Interest, SegmentCondition};
use crate::models::newsletter::ThemeSet;

/// Kind-of-mail interests whose subscribers receive decision newsletters.
pub const DECISION_STRINGS: [&str; 2] = [
    "Ik ontvang enkel beslissingen",
    "Ik ontvang zowel persberichten als beslissingen",
];

fn interests_condition(category_id: &str, ids: Vec<String>) -> SegmentCondition {
    SegmentCondition {
        condition_type: "Interests".to_string(),
        field: format!("interests-{category_id}"),
        op: "interestcontains".to_string(),
        value: ids,
    }
}

/// Subscribers interested in any theme that occurs in this newsletter.
pub fn theme_condition(category_id: &str, interests: &[Interest], themes: &ThemeSet) -> SegmentCondition {
    let ids = interests
        .iter()
        .filter(|i| themes.contains(&i.name))
        .map(|i| i.id.clone())
        .collect();
    interests_condition(category_id, ids)
}

/// Subscribers who opted in to decision mails.
pub fn kind_condition(category_id: &str, interests: &[Interest]) -> SegmentCondition {
    let ids = interests
        .iter()
        .filter(|i| DECISION_STRINGS.contains(&i.name.as_str()))
        .map(|i| i.id.clone())
        .collect();
    interests_condition(category_id, ids)
}
