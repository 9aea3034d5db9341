use std::fmt;
use std::time::Duration;

use crate::models::newsletter::PriorityScheme;
use crate::retry::RetryPolicy;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "environment variable {key} must be configured"),
            ConfigError::Invalid { key, value } => write!(f, "invalid value {value:?} for {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct SparqlConfig {
    pub endpoint: String,
    pub target_graph: String,
}

#[derive(Debug, Clone)]
pub struct MailchimpConfig {
    pub api_key: String,
    pub server: String,
    pub from_name: String,
    pub reply_to: String,
    pub list_id: String,
    pub interest_category_id: String,
    pub kind_category_id: String,
    pub delete_retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct BelgaConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub storage_path: String,
}

/// Everything the service reads from its environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub priority_scheme: PriorityScheme,
    pub sparql: SparqlConfig,
    pub mailchimp: MailchimpConfig,
    pub belga: BelgaConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let priority_scheme = match get("NEWSLETTER_PRIORITY_SCHEME") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "NEWSLETTER_PRIORITY_SCHEME",
                value,
            })?,
            None => PriorityScheme::default(),
        };

        let delete_attempts = parse_number(&get, "MAILCHIMP_DELETE_ATTEMPTS", 4)?;
        let delete_attempts = u32::try_from(delete_attempts).map_err(|_| ConfigError::Invalid {
            key: "MAILCHIMP_DELETE_ATTEMPTS",
            value: delete_attempts.to_string(),
        })?;
        let delete_delay_ms = parse_number(&get, "MAILCHIMP_DELETE_DELAY_MS", 2000)?;

        Ok(Self {
            bind_address: or_default("BIND_ADDRESS", "0.0.0.0:80"),
            priority_scheme,
            sparql: SparqlConfig {
                endpoint: or_default("MU_SPARQL_ENDPOINT", "http://database:8890/sparql"),
                target_graph: or_default(
                    "TARGET_GRAPH",
                    "http://mu.semte.ch/graphs/organizations/kanselarij",
                ),
            },
            mailchimp: MailchimpConfig {
                api_key: required("MAILCHIMP_API")?,
                server: or_default("MAILCHIMP_SERVER", "us3"),
                from_name: required("MAILCHIMP_FROM_NAME")?,
                reply_to: required("MAILCHIMP_REPLY_TO")?,
                list_id: required("MAILCHIMP_LIST_ID")?,
                interest_category_id: required("MAILCHIMP_INTEREST_CATEGORY_ID")?,
                kind_category_id: required("MAILCHIMP_KIND_CATEGORY_ID")?,
                delete_retry: RetryPolicy::new(
                    delete_attempts,
                    Duration::from_millis(delete_delay_ms),
                ),
            },
            belga: BelgaConfig {
                host: or_default("BELGA_FTP_HOST", "ftp.belga.be"),
                username: required("BELGA_FTP_USERNAME")?,
                password: required("BELGA_FTP_PASSWORD")?,
                storage_path: or_default("XML_STORAGE_PATH", "/data"),
            },
        })
    }
}

fn parse_number<G>(get: &G, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
