use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::mailchimp::Campaign;
use crate::sparql::{SparqlClient, escape_datetime, escape_string, escape_uri};

const MAIL_CAMPAIGN_BASE_URI: &str = "http://themis.vlaanderen.be/id/mailcampagne/";
const BELGA_PUBLICATION_BASE_URI: &str = "http://themis.vlaanderen.be/id/belga-publicatie/";

/// Write side of the triple store: what was published, and when.
#[allow(async_fn_in_trait)]
pub trait PublicationLedger {
    /// Link a freshly created mail campaign to its meeting. Returns the record's uuid.
    async fn record_mail_campaign(&self, meeting_uri: &str, campaign: &Campaign) -> Result<String, AppError>;

    async fn mark_campaign_sent(&self, campaign_id: &str, sent_at: DateTime<Utc>) -> Result<(), AppError>;

    async fn delete_mail_campaign(&self, campaign_id: &str) -> Result<(), AppError>;

    /// Replace the meeting's Belga publication record. Returns the new record's uuid.
    async fn record_belga_publication(&self, meeting_uri: &str, sent_at: DateTime<Utc>) -> Result<String, AppError>;
}

impl PublicationLedger for SparqlClient {
    async fn record_mail_campaign(&self, meeting_uri: &str, campaign: &Campaign) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let uri = format!("{MAIL_CAMPAIGN_BASE_URI}{id}");
        log::info!("Create mail campaign {id} for meeting {meeting_uri}");

        self.update(&format!(
            "PREFIX mu: <http://mu.semte.ch/vocabularies/core/>
PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>

INSERT DATA {{
  GRAPH {graph} {{
    {meeting} ext:heeftMailCampagnes {campaign} .
    {campaign} a ext:MailCampagne ;
      mu:uuid {id} ;
      ext:campagneId {campaign_id} ;
      ext:campagneWebId {web_id} ;
      ext:voorbeeldUrl {archive_url} .
  }}
}}",
            graph = escape_uri(self.target_graph()),
            meeting = escape_uri(meeting_uri),
            campaign = escape_uri(&uri),
            id = escape_string(&id),
            campaign_id = escape_string(&campaign.id),
            web_id = escape_string(&campaign.web_id.to_string()),
            archive_url = escape_string(&campaign.archive_url),
        ))
        .await?;
        Ok(id)
    }

    async fn mark_campaign_sent(&self, campaign_id: &str, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        log::info!("Updating mail campaign {campaign_id} sent time");
        self.update(&format!(
            "PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>

INSERT {{
  GRAPH {graph} {{ ?mailCampaign ext:isVerstuurdOp {sent_at} }}
}} WHERE {{
  GRAPH {graph} {{
    ?mailCampaign a ext:MailCampagne ;
      ext:campagneId {campaign_id} .
  }}
}}",
            graph = escape_uri(self.target_graph()),
            sent_at = escape_datetime(&sent_at),
            campaign_id = escape_string(campaign_id),
        ))
        .await
    }

    async fn delete_mail_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        log::info!("Deleting mail campaign record {campaign_id}");
        self.update(&format!(
            "PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>

DELETE {{
  GRAPH {graph} {{
    ?mailCampaign ?p ?o .
    ?s ?pp ?mailCampaign .
  }}
}} WHERE {{
  GRAPH {graph} {{
    ?mailCampaign a ext:MailCampagne ;
      ext:campagneId {campaign_id} ;
      ?p ?o .
    OPTIONAL {{ ?s ?pp ?mailCampaign . }}
  }}
}}",
            graph = escape_uri(self.target_graph()),
            campaign_id = escape_string(campaign_id),
        ))
        .await
    }

    async fn record_belga_publication(&self, meeting_uri: &str, sent_at: DateTime<Utc>) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let uri = format!("{BELGA_PUBLICATION_BASE_URI}{id}");
        log::info!("Create Belga publication {id} for meeting {meeting_uri}");

        let graph = escape_uri(self.target_graph());
        let meeting = escape_uri(meeting_uri);

        self.update(&format!(
            "PREFIX mu: <http://mu.semte.ch/vocabularies/core/>
PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>

DELETE WHERE {{
  GRAPH {graph} {{
    {meeting} ext:heeftBelgaPublicatie ?publication .
    ?publication a ext:BelgaPublicatie ;
      mu:uuid ?id ;
      ext:isVerstuurdOp ?datetime .
  }}
}}"
        ))
        .await?;

        self.update(&format!(
            "PREFIX mu: <http://mu.semte.ch/vocabularies/core/>
PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>

INSERT DATA {{
  GRAPH {graph} {{
    {meeting} ext:heeftBelgaPublicatie {publication} .
    {publication} a ext:BelgaPublicatie ;
      mu:uuid {id} ;
      ext:isVerstuurdOp {sent_at} .
  }}
}}",
            publication = escape_uri(&uri),
            id = escape_string(&id),
            sent_at = escape_datetime(&sent_at),
        ))
        .await?;
        Ok(id)
    }
}
