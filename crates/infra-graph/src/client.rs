// Graph DistributionApi adapter

use async_trait::async_trait;
use relay_core::domain::{AppCredentials, TargetMetadata};
use relay_core::port::{ApiError, CaptionUpload, DistributionApi, VideoUpload};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::GraphConfig;
use crate::response::expect_success;
use crate::signing::appsecret_proof;

/// Talks to a Graph-style REST API on behalf of one application.
///
/// Every request carries the page access token and an `appsecret_proof`
/// derived from the application secret.
pub struct GraphDistributionApi {
    pub(crate) http: reqwest::Client,
    pub(crate) config: GraphConfig,
}

impl GraphDistributionApi {
    pub fn new(config: GraphConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { http, config })
    }

    /// Send a request and return status + body text
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        debug!(status = status, bytes = body.len(), "Graph response received");
        Ok((status, body))
    }
}

/// `access_token` + `appsecret_proof` pair sent with every call
pub(crate) fn auth_params(
    credentials: &AppCredentials,
    access_token: &str,
) -> Result<Vec<(&'static str, String)>, ApiError> {
    Ok(vec![
        ("access_token", access_token.to_string()),
        (
            "appsecret_proof",
            appsecret_proof(&credentials.app_secret, access_token)?,
        ),
    ])
}

/// Multipart form pre-filled with the auth params
pub(crate) fn auth_form(auth: &[(&'static str, String)]) -> Form {
    auth.iter()
        .fold(Form::new(), |form, (key, value)| form.text(*key, value.clone()))
}

pub(crate) fn with_metadata(form: Form, metadata: &TargetMetadata) -> Form {
    metadata
        .to_form_fields()
        .into_iter()
        .fold(form, |form, (key, value)| form.text(key, value))
}

/// Read a whole local file into a named multipart part
pub(crate) async fn file_part(path: &Path, file_name: String) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
    Ok(Part::bytes(bytes).file_name(file_name))
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> ApiError {
    ApiError::Io(format!("{}: {}", path.display(), err))
}

fn transport(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::InvalidResponse(format!("Invalid request: {}", err))
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// File name the target reads the caption locale from: `{stem}.{locale}.srt`
pub(crate) fn caption_file_name(caption_path: &Path, locale: &str) -> String {
    let stem = caption_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("captions");
    format!("{}.{}.srt", stem, locale)
}

impl GraphDistributionApi {
    async fn post_staged_caption(
        &self,
        auth: &[(&'static str, String)],
        upload: &CaptionUpload<'_>,
        staging_dir: &Path,
    ) -> Result<(), ApiError> {
        let file_name = caption_file_name(upload.caption_path, upload.locale);
        let staged = staging_dir.join(&file_name);
        tokio::fs::copy(upload.caption_path, &staged)
            .await
            .map_err(|e| io_error(upload.caption_path, e))?;

        let form = auth_form(auth)
            .text("locale", upload.locale.to_string())
            .part("captions_file", file_part(&staged, file_name).await?);
        let url = self.config.api_url(&format!("{}/captions", upload.video_id));
        let (status, body) = self.send(self.http.post(url).multipart(form)).await?;
        expect_success(status, &body)
    }
}

#[async_trait]
impl DistributionApi for GraphDistributionApi {
    async fn upload_video(
        &self,
        credentials: &AppCredentials,
        upload: VideoUpload<'_>,
    ) -> Result<String, ApiError> {
        let auth = auth_params(credentials, upload.access_token)?;
        if upload.file_size > self.config.chunk_threshold_bytes {
            self.upload_resumable(&auth, &upload).await
        } else {
            self.upload_single(&auth, &upload).await
        }
    }

    async fn update_video(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        metadata: &TargetMetadata,
        video_id: &str,
    ) -> Result<(), ApiError> {
        let mut fields = auth_params(credentials, access_token)?;
        fields.extend(metadata.to_form_fields());

        let (status, body) = self
            .send(self.http.post(self.config.api_url(video_id)).form(&fields))
            .await?;
        expect_success(status, &body)?;
        info!(video_id = %video_id, "Graph video metadata updated");
        Ok(())
    }

    async fn delete_video(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        video_id: &str,
    ) -> Result<(), ApiError> {
        let auth = auth_params(credentials, access_token)?;
        let (status, body) = self
            .send(self.http.delete(self.config.api_url(video_id)).query(&auth))
            .await?;
        expect_success(status, &body)?;
        info!(video_id = %video_id, "Graph video deleted");
        Ok(())
    }

    async fn upload_captions(
        &self,
        credentials: &AppCredentials,
        upload: CaptionUpload<'_>,
    ) -> Result<(), ApiError> {
        let auth = auth_params(credentials, upload.access_token)?;
        let staging_dir = upload.scratch_dir.join(uuid::Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&staging_dir)
            .await
            .map_err(|e| io_error(&staging_dir, e))?;

        let result = self.post_staged_caption(&auth, &upload, &staging_dir).await;

        if let Err(e) = tokio::fs::remove_dir_all(&staging_dir).await {
            warn!(path = %staging_dir.display(), error = %e, "Failed to clean caption staging dir");
        }
        if result.is_ok() {
            info!(video_id = %upload.video_id, locale = %upload.locale, "Graph captions uploaded");
        }
        result
    }

    async fn delete_captions(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        video_id: &str,
        locale: &str,
    ) -> Result<(), ApiError> {
        let mut params = auth_params(credentials, access_token)?;
        params.push(("locale", locale.to_string()));

        let url = self.config.api_url(&format!("{}/captions", video_id));
        let (status, body) = self.send(self.http.delete(url).query(&params)).await?;
        expect_success(status, &body)?;
        info!(video_id = %video_id, locale = %locale, "Graph captions deleted");
        Ok(())
    }
}
