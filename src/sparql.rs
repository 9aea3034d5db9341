use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::config::SparqlConfig;
use crate::errors::AppError;

/// One solution of a SELECT query. Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparqlRow(HashMap<String, String>);

impl SparqlRow {
    pub fn get(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(String::as_str)
    }

    pub fn get_owned(&self, var: &str) -> Option<String> {
        self.0.get(var).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SparqlRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SparqlRow(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Parse a `application/sparql-results+json` document into rows.
pub fn parse_results(body: &str) -> Result<Vec<SparqlRow>, AppError> {
    let parsed: SparqlResults = serde_json::from_str(body)?;
    Ok(parsed
        .results
        .bindings
        .into_iter()
        .map(|binding| binding.into_iter().map(|(k, term)| (k, term.value)).collect())
        .collect())
}

/// Client for the SPARQL 1.1 protocol endpoint of the triple store.
#[derive(Clone)]
pub struct SparqlClient {
    client: reqwest::Client,
    endpoint: String,
    target_graph: String,
}

impl SparqlClient {
    pub fn new(config: &SparqlConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            target_graph: config.target_graph.clone(),
        })
    }

    pub fn target_graph(&self) -> &str {
        &self.target_graph
    }

    pub async fn query(&self, query: &str) -> Result<Vec<SparqlRow>, AppError> {
        let body = self.post("query", query).await?;
        parse_results(&body)
    }

    pub async fn update(&self, update: &str) -> Result<(), AppError> {
        self.post("update", update).await.map(|_| ())
    }

    async fn post(&self, field: &str, statement: &str) -> Result<String, AppError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/sparql-results+json")
            .form(&[(field, statement)])
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(AppError::Sparql(format!("{field} returned {status}: {text}")));
        }
        Ok(text)
    }
}

pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn escape_uri(value: &str) -> String {
    format!("<{}>", value.replace('>', "\\>"))
}

pub fn escape_datetime(value: &DateTime<Utc>) -> String {
    format!(
        "\"{}\"^^<http://www.w3.org/2001/XMLSchema#dateTime>",
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
