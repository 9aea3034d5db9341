use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::AppState;
use crate::errors::AppError;
use crate::mailchimp::{self, CampaignProvider};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignQuery {
    pub meeting_id: Option<String>,
}

/// POST /mail-campaigns?meetingId=...
pub async fn create(
    state: web::Data<AppState>,
    query: web::Query<CreateCampaignQuery>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = query
        .meeting_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter meetingId is required".to_string()))?;

    let prepared = mailchimp::prepare_campaign(
        &state.sparql,
        &state.sparql,
        &state.mailchimp,
        &state.config.mailchimp,
        state.config.priority_scheme,
        meeting_id,
    )
    .await?;
    Ok(HttpResponse::Created().json(prepared))
}

/// POST /mail-campaigns/{id}/send
pub async fn send(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let campaign_id = path.into_inner();
    mailchimp::send_campaign(&state.sparql, &state.mailchimp, &campaign_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "campaignId": campaign_id, "sent": true })))
}

/// GET /mail-campaigns/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let metadata = state.mailchimp.campaign(&path).await?;
    Ok(HttpResponse::Ok().json(metadata))
}

/// GET /mail-campaigns/{id}/content
pub async fn content(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let html = state.mailchimp.campaign_content(&path).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// DELETE /mail-campaigns/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    mailchimp::delete_campaign(&state.sparql, &state.mailchimp, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
