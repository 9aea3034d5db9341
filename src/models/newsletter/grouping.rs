use std::cmp::Ordering;
use std::collections::HashMap;

use super::proposal::compose_proposal_text;
use super::types::*;

impl PriorityScheme {
    /// Read a raw `mandateePriority` under this scheme. Blank or unparseable values are `None`.
    pub fn normalize(&self, raw: Option<&str>) -> Option<Priority> {
        let raw = non_blank(raw)?.trim();
        match self {
            PriorityScheme::Numeric => raw.parse::<i64>().ok().map(Priority::Rank),
            PriorityScheme::Alphanumeric => match raw.parse::<u32>() {
                Ok(n @ 1..=26) => Some(Priority::Letter(char::from(b'A' + (n - 1) as u8))),
                Ok(_) => None,
                Err(_) => {
                    let mut chars = raw.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => {
                            Some(Priority::Letter(c.to_ascii_uppercase()))
                        }
                        _ => None,
                    }
                }
            },
        }
    }
}

struct Accumulator<'a> {
    first: &'a RawDecisionRecord,
    mandatees: Vec<Mandatee>,
}

/// Collapse co-sponsor rows into one item per newsletter id and order the items
/// by their mandatee group priority, then by agenda position.
///
/// E.g. with mandatee ranks:
///   item 1: M1(1)            -> 1
///   item 2: M1(1), M2(2)      -> 1.02
///   item 3: M1(1), M3(3)      -> 1.03
///   item 4: M2(2)             -> 2
pub fn group(records: &[RawDecisionRecord], scheme: PriorityScheme) -> Vec<GroupedNewsletterItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accumulators: Vec<Accumulator<'_>> = Vec::new();

    for record in records {
        let mandatee = mandatee_from(record, scheme);
        match index.get(record.newsletter_id.as_str()) {
            Some(&i) => accumulators[i].mandatees.push(mandatee),
            None => {
                index.insert(record.newsletter_id.as_str(), accumulators.len());
                accumulators.push(Accumulator {
                    first: record,
                    mandatees: vec![mandatee],
                });
            }
        }
    }

    let mut items: Vec<GroupedNewsletterItem> = accumulators
        .into_iter()
        .map(|acc| finish(acc, scheme))
        .collect();
    items.sort_by(compare_items);
    items
}

fn mandatee_from(record: &RawDecisionRecord, scheme: PriorityScheme) -> Mandatee {
    let raw = record.mandatee_priority.as_deref();
    let priority = scheme.normalize(raw);
    if priority.is_none() {
        if let Some(value) = non_blank(raw) {
            log::warn!(
                "Unreadable mandatee priority {value:?} on newsletter item {}; sorting it last",
                record.newsletter_id
            );
        }
    }
    Mandatee {
        priority,
        title: record.mandatee_title.clone(),
        nickname: record.mandatee_nickname.clone(),
    }
}

fn finish(acc: Accumulator<'_>, scheme: PriorityScheme) -> GroupedNewsletterItem {
    let Accumulator { first, mut mandatees } = acc;
    mandatees.sort_by(Mandatee::cmp_priority);

    let group_name = distinct(
        mandatees
            .iter()
            .filter_map(|m| non_blank(m.title.as_deref()).map(str::to_string)),
    )
    .join(",");

    let group_priority = match scheme {
        PriorityScheme::Numeric => numeric_group_priority(&mandatees),
        PriorityScheme::Alphanumeric => alphanumeric_group_priority(&mandatees),
    };

    let unique = distinct(mandatees.iter().cloned());
    let proposal_text = compose_proposal_text(&unique);

    GroupedNewsletterItem {
        newsletter_id: first.newsletter_id.clone(),
        title: first.title.clone(),
        rich_text: first.rich_text.clone(),
        themes: first.themes.clone(),
        item_position: first
            .item_position
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok()),
        mandatees,
        group_name,
        group_priority,
        proposal_text,
    }
}

/// `min(P) + sum(p / 100)` over the remaining distinct ranks.
fn numeric_group_priority(sorted: &[Mandatee]) -> GroupPriority {
    let ranks = distinct(sorted.iter().filter_map(|m| match m.priority {
        Some(Priority::Rank(n)) => Some(n),
        _ => None,
    }));
    match ranks.split_first() {
        None => GroupPriority::Numeric(MISSING_NUMERIC_GROUP_PRIORITY),
        Some((min, rest)) => {
            let tail: f64 = rest.iter().map(|p| *p as f64 / 100.0).sum();
            GroupPriority::Numeric(*min as f64 + tail)
        }
    }
}

fn alphanumeric_group_priority(sorted: &[Mandatee]) -> GroupPriority {
    let letters = distinct(sorted.iter().map(|m| match m.priority {
        Some(p) => p.to_string(),
        None => MISSING_LETTER_PRIORITY.to_string(),
    }));
    if letters.is_empty() {
        GroupPriority::Alphanumeric(MISSING_LETTER_PRIORITY.to_string())
    } else {
        GroupPriority::Alphanumeric(letters.join(","))
    }
}

fn compare_items(a: &GroupedNewsletterItem, b: &GroupedNewsletterItem) -> Ordering {
    a.group_priority
        .cmp(&b.group_priority)
        .then_with(|| match (a.item_position, b.item_position) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// First occurrence of each value, in input order.
fn distinct<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
