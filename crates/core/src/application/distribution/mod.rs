// Distribution Engine - submit / update / delete against one target

pub mod captions;
pub mod metadata;


pub use captions::resolve_locale;
pub use metadata::to_target_metadata;

use crate::domain::{
    AppCredentials, CaptionInfo, DeleteJobData, DistributionAction, DistributionOutcome,
    DistributionProfile, FieldValues, JobData, PageProfile, RemoteMediaFile, SubmitJobData,
    UpdateJobData,
};
use crate::error::{AppError, PrerequisiteError, Result};
use crate::port::{
    ApiOperation, CaptionUpload, ContentRepository, CredentialStore, DistributionApi, LocaleTable,
    TimeProvider, VideoUpload,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes one distribution operation per call.
///
/// Holds no state between calls apart from the credentials read at
/// configuration time. Each step is awaited in order, so at most one external
/// call is in flight per invocation.
pub struct DistributionEngine {
    api: Arc<dyn DistributionApi>,
    content: Arc<dyn ContentRepository>,
    locales: Arc<dyn LocaleTable>,
    time_provider: Arc<dyn TimeProvider>,
    credentials: AppCredentials,
    scratch_dir: PathBuf,
}

impl DistributionEngine {
    pub fn new(
        api: Arc<dyn DistributionApi>,
        content: Arc<dyn ContentRepository>,
        locales: Arc<dyn LocaleTable>,
        time_provider: Arc<dyn TimeProvider>,
        credentials: AppCredentials,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            content,
            locales,
            time_provider,
            credentials,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Build an engine with credentials read from `credential_store`.
    ///
    /// Empty credentials are accepted here and rejected by every operation,
    /// so a misconfigured engine still reports per job why it cannot run.
    pub async fn configure(
        credential_store: &dyn CredentialStore,
        api: Arc<dyn DistributionApi>,
        content: Arc<dyn ContentRepository>,
        locales: Arc<dyn LocaleTable>,
        time_provider: Arc<dyn TimeProvider>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let credentials = credential_store.load().await?;
        if !has_credentials(&credentials) {
            warn!("Distribution engine configured without complete app credentials");
        }
        Ok(Self::new(
            api,
            content,
            locales,
            time_provider,
            credentials,
            scratch_dir,
        ))
    }

    /// Check the profile and credentials before any file or network access
    pub fn validate<'a>(&self, profile: Option<&'a DistributionProfile>) -> Result<&'a PageProfile> {
        let page = profile
            .and_then(DistributionProfile::as_page)
            .ok_or_else(|| {
                AppError::Config("Distribution profile must be a graph_page profile".to_string())
            })?;

        if is_blank(&self.credentials.app_id) {
            return Err(AppError::Config("App id is not configured".to_string()));
        }
        if is_blank(&self.credentials.app_secret) {
            return Err(AppError::Config("App secret is not configured".to_string()));
        }

        Ok(page)
    }

    /// Run whichever operation the job carries
    pub async fn execute(&self, job: &mut JobData) -> Result<DistributionOutcome> {
        match job {
            JobData::Submit(data) => self.submit(data).await,
            JobData::Update(data) => self.update(data).await,
            JobData::Delete(data) => self.delete(data).await,
        }
    }

    /// Upload the video, then attach every caption in the payload.
    ///
    /// An entry that already has a remote id is adopted as-is without any
    /// external call. A caption failure aborts the whole submission.
    pub async fn submit(&self, job: &mut SubmitJobData) -> Result<DistributionOutcome> {
        let page = self.validate(job.distribution_profile.as_ref())?;

        if let Some(remote_id) = job.entry_distribution.remote_id() {
            info!(remote_id = %remote_id, "Entry already distributed, adopting remote id");
            job.remote_id = Some(remote_id.to_string());
            return Ok(DistributionOutcome::AlreadySubmitted {
                remote_id: remote_id.to_string(),
            });
        }

        let video_path = job
            .provider_data
            .video_asset_file_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
            .ok_or(PrerequisiteError::NoAsset)?;

        if !self.content.exists(video_path).await {
            warn!(path = %video_path.display(), "Video asset not synced yet");
            return Err(PrerequisiteError::AssetNotSynced {
                path: video_path.display().to_string(),
            }
            .into());
        }

        let fields = FieldValues::parse(&job.provider_data.field_values)?;
        let metadata = to_target_metadata(&fields, true, self.time_provider.now_secs());
        let file_size = self.content.file_size(video_path).await?;
        let thumb_path = job
            .provider_data
            .thumb_asset_file_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new);

        info!(
            page_id = %page.page_id,
            path = %video_path.display(),
            file_size = file_size,
            scheduled = metadata.is_scheduled(),
            "Submitting video"
        );

        let upload = VideoUpload {
            page_id: &page.page_id,
            access_token: &page.page_access_token,
            video_path,
            thumb_path,
            file_size,
            scratch_dir: &self.scratch_dir,
            metadata: &metadata,
        };
        let remote_id = self
            .api
            .upload_video(&self.credentials, upload)
            .await
            .map_err(|e| AppError::external(ApiOperation::UploadVideo, e))?;

        info!(remote_id = %remote_id, "Video submitted");
        job.remote_id = Some(remote_id.clone());

        let mut media_files = Vec::with_capacity(job.provider_data.captions_info.len());
        for caption in &job.provider_data.captions_info {
            media_files.push(self.submit_caption(page, caption, &remote_id).await?);
        }
        job.media_files = media_files.clone();

        Ok(DistributionOutcome::Submitted {
            remote_id,
            media_files,
        })
    }

    /// Update metadata, then replace all captions.
    ///
    /// Every previously attached caption is deleted before any caption is
    /// (re)submitted, whether or not the payload changed. Only captions marked
    /// `Submit` are attached again. A failure partway leaves caption state on
    /// the target undefined.
    pub async fn update(&self, job: &mut UpdateJobData) -> Result<DistributionOutcome> {
        let page = self.validate(job.distribution_profile.as_ref())?;
        let remote_id = job
            .entry_distribution
            .remote_id()
            .ok_or(PrerequisiteError::MissingRemoteId("update"))?
            .to_string();

        let fields = FieldValues::parse(&job.provider_data.field_values)?;
        let metadata = to_target_metadata(&fields, false, self.time_provider.now_secs());

        info!(remote_id = %remote_id, "Updating video metadata");
        self.api
            .update_video(
                &self.credentials,
                &page.page_access_token,
                &metadata,
                &remote_id,
            )
            .await
            .map_err(|e| AppError::external(ApiOperation::UpdateVideo, e))?;

        debug!(
            remote_id = %remote_id,
            existing = job.media_files.len(),
            "Removing distributed captions"
        );
        while let Some(media_file) = job.media_files.pop() {
            self.delete_caption(page, &media_file.remote_id, &remote_id)
                .await?;
        }

        for caption in job
            .provider_data
            .captions_info
            .iter()
            .filter(|c| c.action == DistributionAction::Submit)
        {
            let media_file = self.submit_caption(page, caption, &remote_id).await?;
            job.media_files.push(media_file);
        }

        info!(
            remote_id = %remote_id,
            captions = job.media_files.len(),
            "Video updated"
        );
        Ok(DistributionOutcome::Updated {
            media_files: job.media_files.clone(),
        })
    }

    /// Remove the video from the target
    pub async fn delete(&self, job: &DeleteJobData) -> Result<DistributionOutcome> {
        let page = self.validate(job.distribution_profile.as_ref())?;
        let remote_id = job
            .entry_distribution
            .remote_id()
            .ok_or(PrerequisiteError::MissingRemoteId("delete"))?;

        info!(remote_id = %remote_id, "Deleting video");
        self.api
            .delete_video(&self.credentials, &page.page_access_token, remote_id)
            .await
            .map_err(|e| AppError::external(ApiOperation::DeleteVideo, e))?;

        Ok(DistributionOutcome::Deleted {
            remote_id: remote_id.to_string(),
        })
    }

    /// Attach one caption to `remote_id` and describe what was attached
    pub async fn submit_caption(
        &self,
        page: &PageProfile,
        caption: &CaptionInfo,
        remote_id: &str,
    ) -> Result<RemoteMediaFile> {
        let locale = resolve_locale(self.locales.as_ref(), caption)?;

        debug!(
            asset_id = %caption.asset_id,
            locale = %locale,
            remote_id = %remote_id,
            "Submitting caption"
        );
        let upload = CaptionUpload {
            access_token: &page.page_access_token,
            video_id: remote_id,
            caption_path: Path::new(&caption.file_path),
            locale: &locale,
            scratch_dir: &self.scratch_dir,
        };
        self.api
            .upload_captions(&self.credentials, upload)
            .await
            .map_err(|e| AppError::external(ApiOperation::UploadCaptions, e))?;

        Ok(RemoteMediaFile {
            asset_id: caption.asset_id.clone(),
            version: caption.version.clone(),
            remote_id: locale,
        })
    }

    /// Remove the caption registered under `locale` from `remote_id`
    pub async fn delete_caption(
        &self,
        page: &PageProfile,
        locale: &str,
        remote_id: &str,
    ) -> Result<()> {
        debug!(locale = %locale, remote_id = %remote_id, "Deleting caption");
        self.api
            .delete_captions(
                &self.credentials,
                &page.page_access_token,
                remote_id,
                locale,
            )
            .await
            .map_err(|e| AppError::external(ApiOperation::DeleteCaptions, e))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_credentials(credentials: &AppCredentials) -> bool {
    !is_blank(&credentials.app_id) && !is_blank(&credentials.app_secret)
}
