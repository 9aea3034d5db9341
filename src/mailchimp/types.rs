use serde::{Deserialize, Serialize};

/// An interest (group) inside one of the audience's interest categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: String,
    pub name: String,
}

/// One segment condition of the campaign's recipient filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentCondition {
    pub condition_type: String,
    pub field: String,
    pub op: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentOptions {
    #[serde(rename = "match")]
    pub match_type: String,
    pub conditions: Vec<SegmentCondition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recipients {
    pub list_id: String,
    pub segment_opts: SegmentOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignSettings {
    pub subject_line: String,
    pub preview_text: String,
    pub title: String,
    pub from_name: String,
    pub reply_to: String,
    pub inline_css: bool,
    pub template_id: u64,
}

/// Body of `POST /campaigns`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCampaign {
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub recipients: Recipients,
    pub settings: CampaignSettings,
}

/// A created campaign as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename(serialize = "campaignId"))]
    pub id: String,
    #[serde(rename(serialize = "webId"))]
    pub web_id: u64,
    #[serde(rename(serialize = "archiveUrl"))]
    pub archive_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedTemplate {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterestList {
    #[serde(default)]
    pub interests: Vec<Interest>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CampaignContent {
    #[serde(default)]
    pub html: String,
}

/// Problem document returned by the Marketing API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ProblemDetail {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}
