use askama::Template;

use crate::models::agenda::AgendaInformation;
use crate::models::newsletter::PresentationItem;

/// HTML document handed to the campaign provider as a template.
///
/// Segment markers and rich text are emitted unescaped; titles and proposal
/// texts are plain text.
#[derive(Template)]
#[template(path = "newsletter/campaign.html")]
pub struct CampaignTemplate {
    pub kind_label: String,
    pub procedure_text: String,
    pub formatted_start: String,
    pub formatted_document_date: String,
    pub items: Vec<PresentationItem>,
}

impl CampaignTemplate {
    pub fn new(info: &AgendaInformation, items: Vec<PresentationItem>) -> Self {
        Self {
            kind_label: info.kind.label().to_string(),
            procedure_text: info.kind.procedure_text().to_string(),
            formatted_start: info.formatted_start(),
            formatted_document_date: info.formatted_document_date(),
            items,
        }
    }
}
