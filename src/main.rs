use actix_web::{App, HttpServer, middleware, web};

use newsletter_service::config::AppConfig;
use newsletter_service::handlers::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Using priority scheme {:?}, SPARQL endpoint {}",
        config.priority_scheme,
        config.sparql.endpoint
    );

    let bind_address = config.bind_address.clone();
    let state = match AppState::new(config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to build HTTP clients: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Starting server at http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({
                    "title": "Not found",
                    "detail": "No such route",
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}
