use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::CampaignProvider;
use super::types::*;
use crate::config::MailchimpConfig;
use crate::errors::AppError;
use crate::retry::RetryPolicy;

/// Marketing API 3.0 client. Campaign deletion goes through the injected retry
/// policy because the API refuses to delete a campaign that is still sending.
#[derive(Clone)]
pub struct MailchimpClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    list_id: String,
    delete_retry: RetryPolicy,
}

impl MailchimpClient {
    pub fn new(config: &MailchimpConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: format!("https://{}.api.mailchimp.com/3.0", config.server),
            api_key: config.api_key.clone(),
            list_id: config.list_id.clone(),
            delete_retry: config.delete_retry,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path.trim_start_matches('/')))
            .basic_auth("anystring", Some(&self.api_key))
    }

    async fn check(resp: Response) -> Result<Response, AppError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ProblemDetail>(&text) {
            Ok(p) if !p.detail.is_empty() => format!("{status} {}: {}", p.title, p.detail),
            _ => format!("{status}: {text}"),
        };
        Err(AppError::Provider(message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let resp = Self::check(builder.send().await?).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), AppError> {
        Self::check(builder.send().await?).await.map(|_| ())
    }
}

impl CampaignProvider for MailchimpClient {
    async fn ping(&self) -> Result<(), AppError> {
        self.send_empty(self.request(Method::GET, "ping")).await
    }

    async fn create_template(&self, name: &str, html: &str) -> Result<u64, AppError> {
        log::info!("Creating Mailchimp template {name:?}");
        let body = serde_json::json!({ "name": name, "html": html });
        let created: CreatedTemplate = self
            .send_json(self.request(Method::POST, "templates").json(&body))
            .await?;
        log::info!("Created Mailchimp template {}", created.id);
        Ok(created.id)
    }

    async fn delete_template(&self, template_id: u64) -> Result<(), AppError> {
        self.send_empty(self.request(Method::DELETE, &format!("templates/{template_id}")))
            .await
    }

    async fn interests(&self, category_id: &str) -> Result<Vec<Interest>, AppError> {
        let path = format!(
            "lists/{}/interest-categories/{category_id}/interests",
            self.list_id
        );
        let list: InterestList = self
            .send_json(self.request(Method::GET, &path).query(&[("count", "100")]))
            .await?;
        Ok(list.interests)
    }

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, AppError> {
        let created: Campaign = self
            .send_json(self.request(Method::POST, "campaigns").json(campaign))
            .await?;
        log::info!("Created Mailchimp campaign {}", created.id);
        Ok(created)
    }

    async fn send_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        self.send_empty(self.request(Method::POST, &format!("campaigns/{campaign_id}/actions/send")))
            .await
    }

    async fn campaign(&self, campaign_id: &str) -> Result<serde_json::Value, AppError> {
        self.send_json(self.request(Method::GET, &format!("campaigns/{campaign_id}")))
            .await
    }

    async fn campaign_content(&self, campaign_id: &str) -> Result<String, AppError> {
        let content: CampaignContent = self
            .send_json(self.request(Method::GET, &format!("campaigns/{campaign_id}/content")))
            .await?;
        Ok(content.html)
    }

    async fn delete_campaign(&self, campaign_id: &str) -> Result<(), AppError> {
        let path = format!("campaigns/{campaign_id}");
        self.delete_retry
            .run(&format!("Deleting Mailchimp campaign {campaign_id}"), |_| {
                self.send_empty(self.request(Method::DELETE, &path))
            })
            .await
    }
}
