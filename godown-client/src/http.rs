//! HTTP transport for the stock backend API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{ErrorBody, UploadResponse};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::image::StagedImage;

/// HTTP client for making network requests to the stock backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    /// Separate client with the long timeout for multipart uploads
    upload_client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        let upload_client = Client::builder()
            .timeout(config.upload_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            upload_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Replace or clear the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn with_auth(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.with_auth(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.with_auth(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.with_auth(self.client.put(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, discarding the response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.with_auth(self.client.delete(self.url(path)));
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, text))
    }

    /// Upload a staged image as multipart form data
    ///
    /// Uses the long-timeout client; returns the server-assigned URL.
    pub async fn upload(&self, image: &StagedImage) -> ClientResult<String> {
        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(|e| ClientError::Validation(format!("staged image unreadable: {}", e)))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::Validation(format!("invalid image type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let request = self.with_auth(self.upload_client.post(self.url("/upload-image")).multipart(form));
        let response = request.send().await?;
        let body: UploadResponse = Self::handle_response(response).await?;
        Ok(body.image_url)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    /// Map a non-2xx status to the error taxonomy, surfacing the backend's
    /// `error` message verbatim when the body carries one.
    fn status_error(status: StatusCode, body: String) -> ClientError {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| "Request failed".to_string());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}
