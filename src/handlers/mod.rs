pub mod belga_handlers;
pub mod campaign_handlers;

use actix_web::web;

use crate::belga::BelgaFtpPublisher;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::mailchimp::MailchimpClient;
use crate::sparql::SparqlClient;

/// Clients and configuration shared by all handlers through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub sparql: SparqlClient,
    pub mailchimp: MailchimpClient,
    pub belga: BelgaFtpPublisher,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            sparql: SparqlClient::new(&config.sparql)?,
            mailchimp: MailchimpClient::new(&config.mailchimp)?,
            belga: BelgaFtpPublisher::new(&config.belga),
            config,
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mail-campaigns")
            .route("", web::post().to(campaign_handlers::create))
            .route("/{id}", web::get().to(campaign_handlers::read))
            .route("/{id}", web::delete().to(campaign_handlers::delete))
            .route("/{id}/content", web::get().to(campaign_handlers::content))
            .route("/{id}/send", web::post().to(campaign_handlers::send)),
    );
    cfg.service(
        web::scope("/belga-newsletters")
            .route("/{meeting_id}", web::get().to(belga_handlers::download))
            .route("/{meeting_id}", web::post().to(belga_handlers::publish)),
    );
}
