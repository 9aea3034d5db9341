pub mod campaign;
pub mod client;
pub mod segments;
pub mod types;

pub use campaign::*;
pub use client::MailchimpClient;
pub use types::*;

use crate::errors::AppError;

/// The email campaign provider, as seen by the publishing workflows.
#[allow(async_fn_in_trait)]
pub trait CampaignProvider {
    async fn ping(&self) -> Result<(), AppError>;

    /// Store an HTML template; returns its id.
    async fn create_template(&self, name: &str, html: &str) -> Result<u64, AppError>;

    async fn delete_template(&self, template_id: u64) -> Result<(), AppError>;

    /// Interests of one interest category of the configured audience.
    async fn interests(&self, category_id: &str) -> Result<Vec<Interest>, AppError>;

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, AppError>;

    async fn send_campaign(&self, campaign_id: &str) -> Result<(), AppError>;

    /// Raw campaign metadata.
    async fn campaign(&self, campaign_id: &str) -> Result<serde_json::Value, AppError>;

    /// Rendered HTML of the campaign.
    async fn campaign_content(&self, campaign_id: &str) -> Result<String, AppError>;

    /// Delete a campaign, retrying while the provider still reports it as sending.
    async fn delete_campaign(&self, campaign_id: &str) -> Result<(), AppError>;
}
