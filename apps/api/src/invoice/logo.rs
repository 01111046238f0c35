use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error, PartialEq)]
pub enum LogoError {
    #[error("logo must be an image, got '{0}'")]
    NotAnImage(String),

    #[error("logo file is empty")]
    Empty,

    #[error("logo is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

impl From<LogoError> for AppError {
    fn from(err: LogoError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Encodes an uploaded image as a `data:` URL the invoice can embed directly.
pub fn logo_data_url(content_type: &str, bytes: &[u8], limit: usize) -> Result<String, LogoError> {
    let mime = content_type.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(LogoError::NotAnImage(content_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(LogoError::Empty);
    }
    if bytes.len() > limit {
        return Err(LogoError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }
    Ok(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
}
