pub mod feed;
pub mod ftp;

pub use feed::*;
pub use ftp::BelgaFtpPublisher;

use crate::errors::AppError;

/// Remote drop box the press feed is delivered to.
#[allow(async_fn_in_trait)]
pub trait FilePublisher {
    async fn publish(&self, name: &str, payload: Vec<u8>) -> Result<(), AppError>;
}
