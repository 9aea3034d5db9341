//! Shared test infrastructure for workflow and model tests.
//!
//! Provides record builders and in-memory stand-ins for the triple store,
//! the campaign provider and the FTP drop box.
//!
//! # Fakes
//! - `FakeSource` - fixed agenda information and decision records
//! - `FakeLedger` - records every write it receives
//! - `FakeProvider` - records every API call, optionally failing some of them
//! - `FakePublisher` - keeps uploaded files in memory
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use newsletter_service::belga::FilePublisher;
use newsletter_service::config::MailchimpConfig;
use newsletter_service::errors::AppError;
use newsletter_service::mailchimp::{Campaign, CampaignProvider, Interest, NewCampaign};
use newsletter_service::models::agenda::{AgendaInformation, MeetingKind, NewsletterSource};
use newsletter_service::models::campaign::PublicationLedger;
use newsletter_service::models::newsletter::RawDecisionRecord;
use newsletter_service::retry::RetryPolicy;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const MEETING_ID: &str = "5F3A8B2C";
pub const MEETING_URI: &str = "http://themis.vlaanderen.be/id/vergaderactiviteit/5F3A8B2C";
pub const AGENDA_URI: &str = "http://themis.vlaanderen.be/id/agenda/7C1D";
pub const THEME_CATEGORY: &str = "theme-cat";
pub const KIND_CATEGORY: &str = "kind-cat";
pub const TEMPLATE_ID: u64 = 4242;
pub const CAMPAIGN_ID: &str = "c0ffee";

// ============================================================================
// RECORD BUILDERS
// ============================================================================

/// One decision row for newsletter `id`, sponsored by a single mandatee.
pub fn record(id: &str, priority: Option<&str>, title: Option<&str>, nickname: Option<&str>) -> RawDecisionRecord {
    RawDecisionRecord {
        newsletter_id: id.to_string(),
        title: Some(format!("Beslissing {id}")),
        rich_text: Some(format!("<p>Inhoud van {id}</p>")),
        mandatee_priority: priority.map(str::to_string),
        mandatee_title: title.map(str::to_string),
        mandatee_nickname: nickname.map(str::to_string),
        ..Default::default()
    }
}

pub fn with_position(mut record: RawDecisionRecord, position: i64) -> RawDecisionRecord {
    record.item_position = Some(position.to_string());
    record
}

pub fn with_themes(mut record: RawDecisionRecord, themes: &str) -> RawDecisionRecord {
    record.themes = Some(themes.to_string());
    record
}

pub fn agenda_information(kind: MeetingKind) -> AgendaInformation {
    AgendaInformation {
        meeting_uri: MEETING_URI.to_string(),
        agenda_uri: AGENDA_URI.to_string(),
        meeting_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        document_publication_date: Utc.with_ymd_and_hms(2024, 3, 4, 13, 0, 0).unwrap(),
        kind,
    }
}

pub fn mailchimp_config() -> MailchimpConfig {
    MailchimpConfig {
        api_key: "key-us3".to_string(),
        server: "us3".to_string(),
        from_name: "Vlaamse Regering".to_string(),
        reply_to: "nieuwsbrief@example.org".to_string(),
        list_id: "list-1".to_string(),
        interest_category_id: THEME_CATEGORY.to_string(),
        kind_category_id: KIND_CATEGORY.to_string(),
        delete_retry: RetryPolicy::new(2, Duration::from_millis(1)),
    }
}

// ============================================================================
// FAKES
// ============================================================================

pub struct FakeSource {
    pub info: AgendaInformation,
    pub records: Vec<RawDecisionRecord>,
}

impl FakeSource {
    pub fn new(records: Vec<RawDecisionRecord>) -> Self {
        Self { info: agenda_information(MeetingKind::Regular), records }
    }
}

impl NewsletterSource for FakeSource {
    async fn agenda_information(&self, meeting_id: &str) -> Result<AgendaInformation, AppError> {
        if meeting_id == MEETING_ID {
            Ok(self.info.clone())
        } else {
            Err(AppError::MissingData(format!("Meeting with id {meeting_id} not found")))
        }
    }

    async fn newsletter_records(&self, _agenda_uri: &str) -> Result<Vec<RawDecisionRecord>, AppError> {
        Ok(self.records.clone())
    }
}

#[derive(Default)]
pub struct FakeLedger {
    pub calls: Mutex<Vec<String>>,
}

impl FakeLedger {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("ledger lock").clone()
    }

    fn push(&self, call: String) {
        self.calls.lock().expect("ledger lock").push(call);
    }
}

impl PublicationLedger for FakeLedger {
    async fn record_mail_campaign(&self, meeting_uri: &str, campaign: &Campaign) -> Result<String, AppError> {
        self.push(format!("record_mail_campaign {meeting_uri} {}", campaign.id));
        Ok("record-1".to_string())
    }

    async fn mark_campaign_sent(&self, campaign_id: &str, _sent_at: DateTime<Utc>) -> Result<(), AppError> {
        self.push(format!("mark_campaign_sent {campaign_id}"));
        Ok(())
    }

    async fn delete_mail_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        self.push(format!("delete_mail_campaign {campaign_id}"));
        Ok(())
    }

    async fn record_belga_publication(&self, meeting_uri: &str, _sent_at: DateTime<Utc>) -> Result<String, AppError> {
        self.push(format!("record_belga_publication {meeting_uri}"));
        Ok("publication-1".to_string())
    }
}

pub struct FakeProvider {
    pub calls: Mutex<Vec<String>>,
    pub templates: Mutex<Vec<(String, String)>>,
    pub campaigns: Mutex<Vec<NewCampaign>>,
    pub theme_interests: Vec<Interest>,
    pub kind_interests: Vec<Interest>,
    pub fail_create_campaign: bool,
    pub fail_delete_template: bool,
    pub fail_send: bool,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            templates: Mutex::new(Vec::new()),
            campaigns: Mutex::new(Vec::new()),
            theme_interests: vec![
                interest("t-eco", "Economie"),
                interest("t-mob", "Mobiliteit"),
                interest("t-ond", "Onderwijs"),
            ],
            kind_interests: vec![
                interest("k-pers", "Ik ontvang enkel persberichten"),
                interest("k-besl", "Ik ontvang enkel beslissingen"),
                interest("k-both", "Ik ontvang zowel persberichten als beslissingen"),
            ],
            fail_create_campaign: false,
            fail_delete_template: false,
            fail_send: false,
        }
    }
}

pub fn interest(id: &str, name: &str) -> Interest {
    Interest { id: id.to_string(), name: name.to_string() }
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("provider lock").clone()
    }

    fn push(&self, call: impl Into<String>) {
        self.calls.lock().expect("provider lock").push(call.into());
    }
}

impl CampaignProvider for FakeProvider {
    async fn ping(&self) -> Result<(), AppError> {
        self.push("ping");
        Ok(())
    }

    async fn create_template(&self, name: &str, html: &str) -> Result<u64, AppError> {
        self.push("create_template");
        self.templates
            .lock()
            .expect("provider lock")
            .push((name.to_string(), html.to_string()));
        Ok(TEMPLATE_ID)
    }

    async fn delete_template(&self, template_id: u64) -> Result<(), AppError> {
        self.push(format!("delete_template {template_id}"));
        if self.fail_delete_template {
            return Err(AppError::Provider("404 Resource Not Found".to_string()));
        }
        Ok(())
    }

    async fn interests(&self, category_id: &str) -> Result<Vec<Interest>, AppError> {
        self.push(format!("interests {category_id}"));
        match category_id {
            THEME_CATEGORY => Ok(self.theme_interests.clone()),
            KIND_CATEGORY => Ok(self.kind_interests.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, AppError> {
        self.push("create_campaign");
        if self.fail_create_campaign {
            return Err(AppError::Provider("400 Invalid Resource".to_string()));
        }
        self.campaigns.lock().expect("provider lock").push(campaign.clone());
        Ok(Campaign {
            id: CAMPAIGN_ID.to_string(),
            web_id: 987,
            archive_url: "http://eepurl.com/abc".to_string(),
        })
    }

    async fn send_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        self.push(format!("send_campaign {campaign_id}"));
        if self.fail_send {
            return Err(AppError::Provider("400 Campaign not ready".to_string()));
        }
        Ok(())
    }

    async fn campaign(&self, campaign_id: &str) -> Result<serde_json::Value, AppError> {
        self.push(format!("campaign {campaign_id}"));
        Ok(serde_json::json!({ "id": campaign_id }))
    }

    async fn campaign_content(&self, campaign_id: &str) -> Result<String, AppError> {
        self.push(format!("campaign_content {campaign_id}"));
        Ok("<html></html>".to_string())
    }

    async fn delete_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        self.push(format!("delete_campaign {campaign_id}"));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePublisher {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakePublisher {
    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().expect("publisher lock").clone()
    }
}

impl FilePublisher for FakePublisher {
    async fn publish(&self, name: &str, payload: Vec<u8>) -> Result<(), AppError> {
        self.uploads
            .lock()
            .expect("publisher lock")
            .push((name.to_string(), payload));
        Ok(())
    }
}
