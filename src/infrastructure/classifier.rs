//! Client for the external waste image classification service
//!
//! The service takes a multipart upload with a single `file` part and answers
//! with `{"wasteType": "...", "confidence": 0.92}`. No classification logic
//! lives here.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("classification service returned {0}")]
    Status(reqwest::StatusCode),
}

/// Result returned by the classification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub waste_type: String,
    pub confidence: f64,
}

/// HTTP client for the classification service
#[derive(Debug, Clone)]
pub struct WasteClassifier {
    client: reqwest::Client,
    url: String,
}

impl WasteClassifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Uploads one image and decodes the service's verdict
    pub async fn classify(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Classification, ClassifierError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let response = self.client.post(&self.url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status()));
        }

        Ok(response.json::<Classification>().await?)
    }
}
