pub mod belga;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod mailchimp;
pub mod models;
pub mod retry;
pub mod sparql;
pub mod templates_structs;
