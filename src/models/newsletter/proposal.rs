use super::types::Mandatee;

const PROPOSAL_PREFIX: &str = "Op voorstel van ";
const SEPARATOR_COMMA: &str = ", ";
const SEPARATOR_AND: &str = " en ";

/// Build "Op voorstel van X, Y en Z" from mandatees already sorted by priority.
///
/// Returns an empty string when there are no mandatees, or when any mandatee
/// has neither a nickname nor a title: a partial sentence is never produced.
pub fn compose_proposal_text(sorted_mandatees: &[Mandatee]) -> String {
    if sorted_mandatees.is_empty() {
        return String::new();
    }

    let last = sorted_mandatees.len() - 1;
    let mut text = String::from(PROPOSAL_PREFIX);
    for (i, mandatee) in sorted_mandatees.iter().enumerate() {
        if i > 0 {
            text.push_str(if i == last { SEPARATOR_AND } else { SEPARATOR_COMMA });
        }
        match mandatee.display_name() {
            Some(name) => text.push_str(name),
            None => return String::new(),
        }
    }
    text
}
