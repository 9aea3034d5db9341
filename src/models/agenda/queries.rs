use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::newsletter::{GroupedNewsletterItem, PriorityScheme, RawDecisionRecord, group};
use crate::sparql::{SparqlClient, SparqlRow, escape_string, escape_uri};
use super::types::*;

const NOTA_TYPE_URI: &str =
    "http://themis.vlaanderen.be/id/concept/agendapunt-type/dd47a8f8-3ad2-4d5a-8318-66fc02fe80fd";

/// Read side of the triple store: where newsletter content comes from.
#[allow(async_fn_in_trait)]
pub trait NewsletterSource {
    /// Meeting, latest agenda, dates and kind for a meeting id.
    async fn agenda_information(&self, meeting_id: &str) -> Result<AgendaInformation, AppError>;

    /// One row per newsletter item per mandatee on the given agenda. May be empty.
    async fn newsletter_records(&self, agenda_uri: &str) -> Result<Vec<RawDecisionRecord>, AppError>;
}

/// Agenda information plus the grouped, ordered newsletter items of the meeting's latest agenda.
pub async fn load_newsletter<S: NewsletterSource>(
    source: &S,
    scheme: PriorityScheme,
    meeting_id: &str,
) -> Result<(AgendaInformation, Vec<GroupedNewsletterItem>), AppError> {
    let info = source.agenda_information(meeting_id).await?;
    let records = source.newsletter_records(&info.agenda_uri).await?;
    if records.is_empty() {
        return Err(AppError::MissingData(format!(
            "No newsletter items present on agenda {}",
            info.agenda_uri
        )));
    }
    let items = group(&records, scheme);
    log::info!(
        "Grouped {} record(s) into {} newsletter item(s) for meeting {meeting_id}",
        records.len(),
        items.len()
    );
    Ok((info, items))
}

impl NewsletterSource for SparqlClient {
    async fn agenda_information(&self, meeting_id: &str) -> Result<AgendaInformation, AppError> {
        let meeting_uri = find_meeting_uri(self, meeting_id).await?;
        let agenda_uri = find_latest_agenda(self, &meeting_uri).await?;

        log::info!("Get agenda information for agenda {agenda_uri}");
        let rows = self
            .query(&format!(
                "PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>
PREFIX besluit: <http://data.vlaanderen.be/ns/besluit#>
PREFIX besluitvorming: <https://data.vlaanderen.be/ns/besluitvorming#>
PREFIX dct: <http://purl.org/dc/terms/>
PREFIX prov: <http://www.w3.org/ns/prov#>
PREFIX generiek: <https://data.vlaanderen.be/ns/generiek#>

SELECT DISTINCT ?meetingDate ?documentPublicationDate ?kind WHERE {{
  GRAPH {graph} {{
    {agenda} a besluitvorming:Agenda ;
      besluitvorming:isAgendaVoor ?meeting .
    ?meeting besluit:geplandeStart ?meetingDate .
    OPTIONAL {{ ?meeting dct:type ?kind . }}
    OPTIONAL {{
      ?publicationActivity a ext:ThemisPublicationActivity ;
        prov:used ?meeting ;
        ext:scope 'documents' ;
        generiek:geplandeStart ?documentPublicationDate .
    }}
  }}
}} ORDER BY ?documentPublicationDate ?meetingDate LIMIT 1",
                graph = escape_uri(self.target_graph()),
                agenda = escape_uri(&agenda_uri),
            ))
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| AppError::MissingData(format!("No agenda information for {agenda_uri}")))?;
        agenda_information_from_row(row, meeting_uri, agenda_uri)
    }

    async fn newsletter_records(&self, agenda_uri: &str) -> Result<Vec<RawDecisionRecord>, AppError> {
        let rows = self
            .query(&format!(
                "PREFIX besluit: <http://data.vlaanderen.be/ns/besluit#>
PREFIX besluitvorming: <https://data.vlaanderen.be/ns/besluitvorming#>
PREFIX ext: <http://mu.semte.ch/vocabularies/ext/>
PREFIX dct: <http://purl.org/dc/terms/>
PREFIX prov: <http://www.w3.org/ns/prov#>
PREFIX tl: <http://mu.semte.ch/vocabularies/typed-literals/>
PREFIX mandaat: <http://data.vlaanderen.be/ns/mandaat#>
PREFIX schema: <http://schema.org/>
PREFIX nie: <http://www.semanticdesktop.org/ontologies/2007/01/19/nie#>

SELECT ?title ?richtext (GROUP_CONCAT(?label;separator=\",\") AS ?themes) ?mandateeTitle ?mandateePriority ?newsletter ?mandateeName ?agendaitemPrio
WHERE {{
  GRAPH {graph} {{
    {agenda} a besluitvorming:Agenda ;
      dct:hasPart ?agendaitem .
    ?agendaitem a besluit:Agendapunt ;
      dct:type {nota} ;
      schema:position ?agendaitemPrio .
    ?treatment a besluit:BehandelingVanAgendapunt ;
      dct:subject ?agendaitem .
    ?newsletter a ext:Nieuwsbericht ;
      prov:wasDerivedFrom ?treatment ;
      ext:inNieuwsbrief \"true\"^^tl:boolean .
    OPTIONAL {{
      ?agendaitem ext:heeftBevoegdeVoorAgendapunt ?mandatee .
      ?mandatee dct:title ?mandateeTitle .
      ?mandatee mandaat:rangorde ?mandateePriority .
      ?mandatee ext:nieuwsbriefTitel ?mandateeName .
    }}
    OPTIONAL {{ ?newsletter nie:htmlContent ?richtext . }}
    OPTIONAL {{ ?newsletter dct:title ?title . }}
  }}
  OPTIONAL {{
    ?newsletter dct:subject ?themeURI .
    ?themeURI ext:mailchimpId ?label .
  }}
}}
GROUP BY ?title ?richtext ?mandateeTitle ?mandateePriority ?newsletter ?mandateeName ?agendaitemPrio
ORDER BY ASC(?mandateePriority)",
                graph = escape_uri(self.target_graph()),
                agenda = escape_uri(agenda_uri),
                nota = escape_uri(NOTA_TYPE_URI),
            ))
            .await?;

        Ok(rows.iter().filter_map(record_from_row).collect())
    }
}

async fn find_meeting_uri(client: &SparqlClient, meeting_id: &str) -> Result<String, AppError> {
    log::info!("Get meeting URI for meeting {meeting_id}");
    let rows = client
        .query(&format!(
            "PREFIX besluit: <http://data.vlaanderen.be/ns/besluit#>
PREFIX mu: <http://mu.semte.ch/vocabularies/core/>
SELECT DISTINCT ?meeting WHERE {{
  GRAPH {graph} {{
    ?meeting a besluit:Vergaderactiviteit ;
      mu:uuid {id} .
  }}
}}",
            graph = escape_uri(client.target_graph()),
            id = escape_string(meeting_id),
        ))
        .await?;
    rows.first()
        .and_then(|r| r.get_owned("meeting"))
        .ok_or_else(|| AppError::MissingData(format!("Meeting with id {meeting_id} not found")))
}

/// Latest agenda of a meeting by serial number, regardless of its status.
async fn find_latest_agenda(client: &SparqlClient, meeting_uri: &str) -> Result<String, AppError> {
    let rows = client
        .query(&format!(
            "PREFIX besluit: <http://data.vlaanderen.be/ns/besluit#>
PREFIX besluitvorming: <https://data.vlaanderen.be/ns/besluitvorming#>
SELECT DISTINCT ?agenda WHERE {{
  GRAPH {graph} {{
    {meeting} a besluit:Vergaderactiviteit .
    ?agenda besluitvorming:isAgendaVoor {meeting} ;
      a besluitvorming:Agenda ;
      besluitvorming:volgnummer ?serialnumber .
  }}
}} ORDER BY DESC(?serialnumber) LIMIT 1",
            graph = escape_uri(client.target_graph()),
            meeting = escape_uri(meeting_uri),
        ))
        .await?;
    rows.first()
        .and_then(|r| r.get_owned("agenda"))
        .ok_or_else(|| AppError::MissingData(format!("No agendas found for meeting {meeting_uri}")))
}

pub fn agenda_information_from_row(
    row: &SparqlRow,
    meeting_uri: String,
    agenda_uri: String,
) -> Result<AgendaInformation, AppError> {
    let meeting_date = row
        .get("meetingDate")
        .ok_or_else(|| AppError::MissingData(format!("Meeting {meeting_uri} has no planned start")))
        .and_then(parse_datetime)?;
    let document_publication_date = row
        .get("documentPublicationDate")
        .ok_or_else(|| AppError::MissingData("This agenda has no Nota documents".to_string()))
        .and_then(parse_datetime)?;

    Ok(AgendaInformation {
        meeting_uri,
        agenda_uri,
        meeting_date,
        document_publication_date,
        kind: MeetingKind::from_uri(row.get("kind")),
    })
}

/// Proposal text is not selected; the grouper derives it from the mandatees.
pub fn record_from_row(row: &SparqlRow) -> Option<RawDecisionRecord> {
    Some(RawDecisionRecord {
        newsletter_id: row.get_owned("newsletter")?,
        title: row.get_owned("title"),
        proposal_text: None,
        rich_text: row.get_owned("richtext"),
        themes: row.get_owned("themes"),
        item_position: row.get_owned("agendaitemPrio"),
        mandatee_priority: row.get_owned("mandateePriority"),
        mandatee_title: row.get_owned("mandateeTitle"),
        mandatee_nickname: row.get_owned("mandateeName"),
    })
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Sparql(format!("unreadable dateTime {value:?}: {e}")))
}
