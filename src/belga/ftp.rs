use std::io::Cursor;

use actix_web::web;
use suppaftp::FtpStream;
use suppaftp::types::FileType;

use super::FilePublisher;
use crate::config::BelgaConfig;
use crate::errors::AppError;

const DEFAULT_FTP_PORT: u16 = 21;

/// Uploads feeds to the Belga FTP server, one session per file.
#[derive(Debug, Clone)]
pub struct BelgaFtpPublisher {
    host: String,
    username: String,
    password: String,
}

impl BelgaFtpPublisher {
    pub fn new(config: &BelgaConfig) -> Self {
        Self {
            host: config.host.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// `host:port`, defaulting to the standard control port.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:{DEFAULT_FTP_PORT}", self.host)
        }
    }
}

impl FilePublisher for BelgaFtpPublisher {
    async fn publish(&self, name: &str, payload: Vec<u8>) -> Result<(), AppError> {
        let address = self.address();
        let username = self.username.clone();
        let password = self.password.clone();
        let name = name.to_string();

        log::info!("Open Belga FTP connection to {address}");
        let uploaded = web::block(move || -> Result<u64, suppaftp::FtpError> {
            let mut ftp = FtpStream::connect(&address)?;
            ftp.login(&username, &password)?;
            ftp.transfer_type(FileType::Binary)?;
            let written = ftp.put_file(&name, &mut Cursor::new(payload))?;
            ftp.quit()?;
            Ok(written)
        })
        .await??;

        log::info!("Uploaded {uploaded} bytes to Belga");
        Ok(())
    }
}
