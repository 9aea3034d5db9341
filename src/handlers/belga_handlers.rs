use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};

use super::AppState;
use crate::belga;
use crate::errors::AppError;

/// GET /belga-newsletters/{meeting_id}: the feed as an XML download, without publishing it.
pub async fn download(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let (_, feed) = belga::build_feed(&state.sparql, state.config.priority_scheme, &path).await?;
    belga::store_feed(&state.config.belga.storage_path, &feed).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(feed.file_name)],
        })
        .body(feed.xml))
}

/// POST /belga-newsletters/{meeting_id}
pub async fn publish(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let published = belga::publish_feed(
        &state.sparql,
        &state.sparql,
        &state.belga,
        &state.config.belga.storage_path,
        state.config.priority_scheme,
        &path,
    )
    .await?;
    Ok(HttpResponse::Created().json(published))
}
