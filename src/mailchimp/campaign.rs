use askama::Template;
use chrono::Utc;
use serde::Serialize;

use super::CampaignProvider;
use super::segments::{kind_condition, theme_condition};
use super::types::*;
use crate::config::MailchimpConfig;
use crate::errors::AppError;
use crate::models::agenda::{AgendaInformation, NewsletterSource, load_newsletter};
use crate::models::campaign::PublicationLedger;
use crate::models::newsletter::{PriorityScheme, ThemeSet, assemble};
use crate::templates_structs::CampaignTemplate;

/// A campaign created for a meeting, plus the id of its triple store record.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedCampaign {
    pub id: String,
    #[serde(flatten)]
    pub campaign: Campaign,
}

/// Build the newsletter of a meeting and turn it into a segmented, unsent campaign.
///
/// The provider template only lives for the duration of the call: it is removed
/// again once the campaign has copied it, also when campaign creation failed.
pub async fn prepare_campaign<S, L, P>(
    source: &S,
    ledger: &L,
    provider: &P,
    config: &MailchimpConfig,
    scheme: PriorityScheme,
    meeting_id: &str,
) -> Result<PreparedCampaign, AppError>
where
    S: NewsletterSource,
    L: PublicationLedger,
    P: CampaignProvider,
{
    provider.ping().await?;

    let (info, items) = load_newsletter(source, scheme, meeting_id).await?;
    let newsletter = assemble(&items);
    let html = CampaignTemplate::new(&info, newsletter.rendered_items).render()?;

    let template_id = provider.create_template(&info.mail_title(), &html).await?;
    log::info!("Created template {template_id} for meeting {meeting_id}");

    let created = create_segmented_campaign(provider, config, &info, &newsletter.themes, template_id).await;

    if let Err(e) = provider.delete_template(template_id).await {
        log::warn!("Could not delete template {template_id}: {e}");
    }
    let campaign = created?;
    log::info!("Created campaign {} for meeting {meeting_id}", campaign.id);

    let id = ledger.record_mail_campaign(&info.meeting_uri, &campaign).await?;
    Ok(PreparedCampaign { id, campaign })
}

async fn create_segmented_campaign<P: CampaignProvider>(
    provider: &P,
    config: &MailchimpConfig,
    info: &AgendaInformation,
    themes: &ThemeSet,
    template_id: u64,
) -> Result<Campaign, AppError> {
    let theme_interests = provider.interests(&config.interest_category_id).await?;
    let kind_interests = provider.interests(&config.kind_category_id).await?;

    let subject = info.mail_subject();
    let request = NewCampaign {
        campaign_type: "regular".to_string(),
        recipients: Recipients {
            list_id: config.list_id.clone(),
            segment_opts: SegmentOptions {
                match_type: "all".to_string(),
                conditions: vec![
                    theme_condition(&config.interest_category_id, &theme_interests, themes),
                    kind_condition(&config.kind_category_id, &kind_interests),
                ],
            },
        },
        settings: CampaignSettings {
            subject_line: subject.clone(),
            preview_text: subject.clone(),
            title: subject,
            from_name: config.from_name.clone(),
            reply_to: config.reply_to.clone(),
            inline_css: true,
            template_id,
        },
    };
    provider.create_campaign(&request).await
}

/// Send a prepared campaign and stamp the send time on its record.
pub async fn send_campaign<L, P>(ledger: &L, provider: &P, campaign_id: &str) -> Result<(), AppError>
where
    L: PublicationLedger,
    P: CampaignProvider,
{
    provider.send_campaign(campaign_id).await?;
    log::info!("Sent campaign {campaign_id}");
    ledger.mark_campaign_sent(campaign_id, Utc::now()).await
}

/// Remove a campaign at the provider, then its record.
pub async fn delete_campaign<L, P>(ledger: &L, provider: &P, campaign_id: &str) -> Result<(), AppError>
where
    L: PublicationLedger,
    P: CampaignProvider,
{
    provider.delete_campaign(campaign_id).await?;
    log::info!("Deleted campaign {campaign_id}");
    ledger.delete_mail_campaign(campaign_id).await
}
