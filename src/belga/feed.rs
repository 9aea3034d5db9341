use std::path::{Path, PathBuf};

use actix_web::web;
use askama::Template;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::Brussels;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::FilePublisher;
use crate::errors::AppError;
use crate::models::agenda::{AgendaInformation, NewsletterSource, load_newsletter};
use crate::models::campaign::PublicationLedger;
use crate::models::newsletter::{GroupedNewsletterItem, PriorityScheme};
use crate::templates_structs::NewsmlTemplate;

/// A rendered NewsML document and the name it is delivered under.
#[derive(Debug, Clone)]
pub struct BelgaFeed {
    pub file_name: String,
    pub xml: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedFeed {
    pub id: String,
    pub file_name: String,
    pub local_path: String,
}

/// One `<p>` per item: title, proposal text and rich text on their own lines,
/// with blank lines, HTML comments and `&nbsp;` line starts removed.
pub fn feed_body(items: &[GroupedNewsletterItem]) -> Result<String, AppError> {
    let comments = Regex::new(r"(?s)<!--.*?-->")?;
    let nbsp_lines = Regex::new(r"\n&nbsp;*")?;

    let paragraphs = items.iter().map(|item| {
        let text = [
            item.title.as_deref().unwrap_or_default(),
            item.proposal_text.as_str(),
            item.rich_text.as_deref().unwrap_or_default(),
        ]
        .join("\n");
        let lines: Vec<&str> = std::iter::once("<p>")
            .chain(text.lines().map(str::trim))
            .chain(std::iter::once("</p>"))
            .filter(|line| !line.is_empty())
            .collect();
        let paragraph = lines.join("\n");
        let paragraph = comments.replace_all(&paragraph, "");
        nbsp_lines.replace_all(&paragraph, "").trim().to_string()
    });
    Ok(paragraphs.collect())
}

/// e.g. `Beslissingen_van_de_ministerraad_via_elektronische_procedure_van_01_maart_2024.xml`
pub fn feed_file_name(info: &AgendaInformation) -> String {
    format!("{}.xml", info.feed_title()).replace(' ', "_")
}

/// `]]>` cannot occur inside a CDATA section; split it over two sections.
fn cdata_safe(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

pub fn render_feed(
    info: &AgendaInformation,
    items: &[GroupedNewsletterItem],
    now: DateTime<Utc>,
) -> Result<BelgaFeed, AppError> {
    let template = NewsmlTemplate {
        transmission_id: Uuid::new_v4().to_string(),
        sent_at: now.with_timezone(&Brussels).format("%Y%m%dT%H%M%S%z").to_string(),
        date_id: info.meeting_date.with_timezone(&Brussels).format("%Y%m%d").to_string(),
        headline: cdata_safe(&info.feed_title()),
        body: cdata_safe(&feed_body(items)?),
    };
    Ok(BelgaFeed {
        file_name: feed_file_name(info),
        xml: template.render()?,
    })
}

/// Build the feed of a meeting's latest agenda.
pub async fn build_feed<S: NewsletterSource>(
    source: &S,
    scheme: PriorityScheme,
    meeting_id: &str,
) -> Result<(AgendaInformation, BelgaFeed), AppError> {
    log::info!("Generating Belga XML for meeting {meeting_id}");
    let (info, items) = load_newsletter(source, scheme, meeting_id).await?;
    let feed = render_feed(&info, &items, Utc::now())?;
    Ok((info, feed))
}

/// Keep a local copy of the feed under `storage_path`.
pub async fn store_feed(storage_path: &str, feed: &BelgaFeed) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from(storage_path);
    let path = dir.join(&feed.file_name);
    let target = path.clone();
    let xml = feed.xml.clone();
    web::block(move || -> std::io::Result<()> {
        std::fs::create_dir_all(&dir)?;
        std::fs::write(&target, xml)
    })
    .await??;
    log::info!("Generated xml file {}", path.display());
    Ok(path)
}

/// Build, store and upload the feed, then record the publication on the meeting.
pub async fn publish_feed<S, L, F>(
    source: &S,
    ledger: &L,
    publisher: &F,
    storage_path: &str,
    scheme: PriorityScheme,
    meeting_id: &str,
) -> Result<PublishedFeed, AppError>
where
    S: NewsletterSource,
    L: PublicationLedger,
    F: FilePublisher,
{
    let (info, feed) = build_feed(source, scheme, meeting_id).await?;
    let local_path = store_feed(storage_path, &feed).await?;

    publisher.publish(&feed.file_name, feed.xml.into_bytes()).await?;
    log::info!("XML has been uploaded to Belga: {}", feed.file_name);

    let id = ledger.record_belga_publication(&info.meeting_uri, Utc::now()).await?;
    Ok(PublishedFeed {
        id,
        file_name: feed.file_name,
        local_path: display_path(&local_path),
    })
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
