pub mod agenda;
pub mod campaign;
pub mod newsletter;
