use chrono::{DateTime, Locale, Utc};
use chrono_tz::Europe::Brussels;
use serde::Serialize;

pub const ELECTRONIC_PROCEDURE_KIND_URI: &str =
    "http://themis.vlaanderen.be/id/concept/vergaderactiviteit-type/2387564a-0897-4a62-9b9a-d1755eece7af";
pub const SPECIAL_MEETING_KIND_URI: &str =
    "http://themis.vlaanderen.be/id/concept/vergaderactiviteit-type/62a0a3c3-44ed-4f35-8b46-1d50616ad42c";
pub const VLAAMSE_VEERKRACHT_KIND_URI: &str =
    "http://themis.vlaanderen.be/id/concept/vergaderactiviteit-type/9b4701f8-a136-4009-94c6-d64fdc96b9a2";

/// Kind of the government meeting, which drives titles and subject lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    #[default]
    Regular,
    ElectronicProcedure,
    Special,
    VlaamseVeerkracht,
}

impl MeetingKind {
    pub fn from_uri(uri: Option<&str>) -> Self {
        match uri {
            Some(ELECTRONIC_PROCEDURE_KIND_URI) => MeetingKind::ElectronicProcedure,
            Some(SPECIAL_MEETING_KIND_URI) => MeetingKind::Special,
            Some(VLAAMSE_VEERKRACHT_KIND_URI) => MeetingKind::VlaamseVeerkracht,
            _ => MeetingKind::Regular,
        }
    }

    /// Label shown in the newsletter header.
    pub fn label(&self) -> &'static str {
        match self {
            MeetingKind::Regular | MeetingKind::ElectronicProcedure => "Ministerraad",
            MeetingKind::Special => "Bijzondere ministerraad",
            MeetingKind::VlaamseVeerkracht => "Ministerraad - Plan Vlaamse Veerkracht",
        }
    }

    /// Label used mid-sentence ("de ministerraad", "de ministerraad - plan Vlaamse Veerkracht").
    pub fn label_in_sentence(&self) -> String {
        self.label()
            .to_lowercase()
            .replace("vlaamse veerkracht", "Vlaamse Veerkracht")
    }

    /// Inserted before "van <date>" in titles; empty or ends with a space.
    pub fn procedure_text(&self) -> &'static str {
        match self {
            MeetingKind::ElectronicProcedure => "via elektronische procedure ",
            _ => "",
        }
    }

    pub fn mail_subject_prefix(&self) -> &'static str {
        match self {
            MeetingKind::Regular => "Ministerraad",
            MeetingKind::ElectronicProcedure => "Ministerraad via elektronische procedure",
            MeetingKind::Special => "Bijzondere Ministerraad",
            MeetingKind::VlaamseVeerkracht => "Ministerraad Vlaamse Veerkracht",
        }
    }
}

/// Meeting-level data needed to title and date a newsletter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaInformation {
    pub meeting_uri: String,
    pub agenda_uri: String,
    pub meeting_date: DateTime<Utc>,
    pub document_publication_date: DateTime<Utc>,
    pub kind: MeetingKind,
}

impl AgendaInformation {
    /// Meeting date as "01 maart 2024" (Brussels time).
    pub fn formatted_start(&self) -> String {
        format_dutch(&self.meeting_date, "%d %B %Y")
    }

    /// Document release as "01 maart 2024 om 14:00" (Brussels time).
    pub fn formatted_document_date(&self) -> String {
        format_dutch(&self.document_publication_date, "%d %B %Y om %H:%M")
    }

    pub fn mail_title(&self) -> String {
        format!("beslissingen van {}", self.formatted_start())
    }

    pub fn mail_subject(&self) -> String {
        format!("{}: {}", self.kind.mail_subject_prefix(), self.mail_title())
    }

    /// Headline of the press feed, e.g. "Beslissingen van de ministerraad van 01 maart 2024".
    pub fn feed_title(&self) -> String {
        format!(
            "Beslissingen van de {} {}van {}",
            self.kind.label_in_sentence(),
            self.kind.procedure_text(),
            self.formatted_start()
        )
    }
}

pub fn format_dutch(value: &DateTime<Utc>, fmt: &str) -> String {
    value
        .with_timezone(&Brussels)
        .format_localized(fmt, Locale::nl_NL)
        .to_string()
}
