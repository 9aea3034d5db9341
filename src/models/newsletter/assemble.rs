use std::collections::BTreeSet;

use serde::Serialize;

use super::types::GroupedNewsletterItem;

/// Interest-group name used in the conditional merge tags.
pub const SEGMENT_PREFIX: &str = "Thema's";
pub const SEGMENT_END: &str = "*|END:INTERESTED|*";

/// Every distinct theme label seen in one run.
pub type ThemeSet = BTreeSet<String>;

/// Conditional merge-tag block around an item: only subscribers interested in
/// one of the listed themes see it. Both markers are empty for theme-less items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentWrapper {
    pub begin: String,
    pub end: String,
}

impl SegmentWrapper {
    pub fn for_themes(themes: &[String]) -> Self {
        if themes.is_empty() {
            return Self::default();
        }
        Self {
            begin: format!("*|INTERESTED:{SEGMENT_PREFIX}:{}|*", themes.join(",")),
            end: SEGMENT_END.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationItem {
    pub newsletter_id: String,
    pub title: String,
    pub proposal_text: String,
    pub rich_text: String,
    pub segment: SegmentWrapper,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledNewsletter {
    pub rendered_items: Vec<PresentationItem>,
    pub themes: ThemeSet,
}

/// Split a comma-joined theme string into distinct, non-empty labels in first-seen order.
pub fn parse_themes(themes: Option<&str>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in themes.unwrap_or_default().split(',').map(str::trim) {
        if !label.is_empty() && !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

/// Turn grouped items into presentation items, keeping their order, and collect
/// the run-wide theme set.
pub fn assemble(items: &[GroupedNewsletterItem]) -> AssembledNewsletter {
    let mut themes = ThemeSet::new();
    let rendered_items = items
        .iter()
        .map(|item| {
            let labels = parse_themes(item.themes.as_deref());
            themes.extend(labels.iter().cloned());
            PresentationItem {
                newsletter_id: item.newsletter_id.clone(),
                title: item.title.clone().unwrap_or_default(),
                proposal_text: item.proposal_text.clone(),
                rich_text: item.rich_text.clone().unwrap_or_default(),
                segment: SegmentWrapper::for_themes(&labels),
            }
        })
        .collect();

    AssembledNewsletter { rendered_items, themes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_themes_deduplicates_and_trims() {
        assert_eq!(
            parse_themes(Some("Mobility, Mobility,Health,,")),
            vec!["Mobility".to_string(), "Health".to_string()]
        );
    }

    #[test]
    fn parse_themes_of_nothing_is_empty() {
        assert!(parse_themes(None).is_empty());
        assert!(parse_themes(Some("")).is_empty());
    }

    #[test]
    fn segment_markers_for_themes() {
        let seg = SegmentWrapper::for_themes(&["Economie".to_string(), "Werk".to_string()]);
        assert_eq!(seg.begin, "*|INTERESTED:Thema's:Economie,Werk|*");
        assert_eq!(seg.end, "*|END:INTERESTED|*");
    }

    #[test]
    fn no_themes_means_unconditional() {
        assert_eq!(SegmentWrapper::for_themes(&[]), SegmentWrapper::default());
    }
}
