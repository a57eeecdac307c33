//! Job lifecycle integration tests
//!
//! Drives submit -> update -> delete through the engine with the local
//! filesystem and layered credential adapters, and a recording API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use relay_core::application::DistributionEngine;
use relay_core::domain::{DistributionOutcome, JobData};
use relay_core::error::PrerequisiteError;
use relay_core::port::distribution_api::mocks::{ApiCall, RecordingDistributionApi};
use relay_core::port::time_provider::SystemTimeProvider;
use relay_core::port::{ApiOperation, BuiltinLocaleTable};
use relay_core::{AppError, Disposition};
use relay_infra_system::{LayeredCredentialStore, LocalContentRepository};
use serde_json::json;

/// Prefix no test environment sets, so only the file is read
const ISOLATED_ENV_PREFIX: &str = "RELAYIT_UNSET";

struct Workspace {
    root: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("relay-it-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(root.join("scratch")).unwrap();
        Self { root }
    }

    fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }

    fn scratch(&self) -> PathBuf {
        self.root.join("scratch")
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

async fn engine(
    ws: &Workspace,
    config: &Path,
    api: Arc<RecordingDistributionApi>,
) -> DistributionEngine {
    let store = LayeredCredentialStore::with_prefix(Some(config.to_path_buf()), ISOLATED_ENV_PREFIX);
    DistributionEngine::configure(
        &store,
        api,
        Arc::new(LocalContentRepository::new()),
        Arc::new(BuiltinLocaleTable),
        Arc::new(SystemTimeProvider),
        ws.scratch(),
    )
    .await
    .unwrap()
}

fn profile() -> serde_json::Value {
    json!({
        "provider": "graph_page",
        "page_id": "page-1",
        "page_access_token": "page-token"
    })
}

#[tokio::test]
async fn test_submit_update_delete_lifecycle() {
    let ws = Workspace::new();
    let config = ws.write("relay.toml", b"app_id = \"app-1\"\napp_secret = \"s3cret\"\n");
    let video = ws.write("video.mp4", &[7u8; 2048]);
    ws.write("en.srt", b"1\n00:00:01,000 --> 00:00:02,000\nHello\n");
    ws.write("fr.srt", b"1\n00:00:01,000 --> 00:00:02,000\nBonjour\n");
    ws.write("es.srt", b"1\n00:00:01,000 --> 00:00:02,000\nHola\n");

    let api = Arc::new(RecordingDistributionApi::new("vid-42"));
    let engine = engine(&ws, &config, api.clone()).await;

    // Submit: video then one caption per entry
    let mut submit: JobData = serde_json::from_value(json!({
        "operation": "submit",
        "distribution_profile": profile(),
        "provider_data": {
            "video_asset_file_path": video.display().to_string(),
            "field_values": "{\"title\":\"Launch day\",\"description\":\"Recap\"}",
            "captions_info": [
                { "asset_id": "cap-en", "version": "1", "language": "English", "file_path": ws.path("en.srt") },
                { "asset_id": "cap-fr", "version": "1", "language": "French", "file_path": ws.path("fr.srt") }
            ]
        }
    }))
    .unwrap();

    let outcome = engine.execute(&mut submit).await.unwrap();
    let media_files = match &outcome {
        DistributionOutcome::Submitted {
            remote_id,
            media_files,
        } => {
            assert_eq!(remote_id, "vid-42");
            media_files.clone()
        }
        other => panic!("unexpected outcome: {:?}", other),
    };
    let locales: Vec<&str> = media_files.iter().map(|m| m.remote_id.as_str()).collect();
    assert_eq!(locales, vec!["en_US", "fr_FR"]);

    match &api.calls()[0] {
        ApiCall::UploadVideo {
            file_size,
            metadata,
            ..
        } => {
            assert_eq!(*file_size, 2048);
            assert_eq!(metadata.title.as_deref(), Some("Launch day"));
            assert_eq!(metadata.name.as_deref(), Some("Launch day"));
        }
        other => panic!("expected video upload first, got {:?}", other),
    }

    // The host persists results into the job payload between runs
    let persisted = serde_json::to_value(&submit).unwrap();
    assert_eq!(persisted["remote_id"], "vid-42");

    // Update: French dropped, Spanish added
    let mut update: JobData = serde_json::from_value(json!({
        "operation": "update",
        "distribution_profile": profile(),
        "entry_distribution": { "remote_id": "vid-42" },
        "provider_data": {
            "field_values": "{\"title\":\"Launch day (edited)\"}",
            "captions_info": [
                { "asset_id": "cap-en", "version": "2", "language": "English", "file_path": ws.path("en.srt") },
                { "asset_id": "cap-fr", "version": "1", "language": "French", "file_path": ws.path("fr.srt"), "action": "DELETE" },
                { "asset_id": "cap-es", "version": "1", "language": "Spanish", "file_path": ws.path("es.srt") }
            ]
        },
        "media_files": persisted["media_files"]
    }))
    .unwrap();

    let before = api.call_count();
    let outcome = engine.execute(&mut update).await.unwrap();

    let update_ops: Vec<ApiOperation> = api.operations()[before..].to_vec();
    assert_eq!(
        update_ops,
        vec![
            ApiOperation::UpdateVideo,
            ApiOperation::DeleteCaptions,
            ApiOperation::DeleteCaptions,
            ApiOperation::UploadCaptions,
            ApiOperation::UploadCaptions,
        ]
    );
    match outcome {
        DistributionOutcome::Updated { media_files } => {
            let locales: Vec<&str> = media_files.iter().map(|m| m.remote_id.as_str()).collect();
            assert_eq!(locales, vec!["en_US", "es_ES"]);
            assert_eq!(media_files[0].version, "2");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    // Delete
    let mut delete: JobData = serde_json::from_value(json!({
        "operation": "delete",
        "distribution_profile": profile(),
        "entry_distribution": { "remote_id": "vid-42" }
    }))
    .unwrap();

    let outcome = engine.execute(&mut delete).await.unwrap();
    assert_eq!(outcome.remote_id(), Some("vid-42"));
    assert!(matches!(
        api.calls().last(),
        Some(ApiCall::DeleteVideo { video_id }) if video_id == "vid-42"
    ));
}

#[tokio::test]
async fn test_unsynced_asset_succeeds_once_file_appears() {
    let ws = Workspace::new();
    let config = ws.write("relay.toml", b"app_id = \"app-1\"\napp_secret = \"s3cret\"\n");
    let api = Arc::new(RecordingDistributionApi::new("vid-7"));
    let engine = engine(&ws, &config, api.clone()).await;

    let mut job: JobData = serde_json::from_value(json!({
        "operation": "submit",
        "distribution_profile": profile(),
        "provider_data": {
            "video_asset_file_path": ws.path("late.mp4"),
            "field_values": ""
        }
    }))
    .unwrap();

    let err = engine.execute(&mut job).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Prerequisite(PrerequisiteError::AssetNotSynced { .. })
    ));
    assert_eq!(err.disposition(), Disposition::Retryable);
    assert_eq!(api.call_count(), 0);

    // The host retries the same job after the sync finishes
    ws.write("late.mp4", &[1u8; 512]);
    let outcome = engine.execute(&mut job).await.unwrap();

    assert_eq!(outcome.remote_id(), Some("vid-7"));
    assert_eq!(api.operations(), vec![ApiOperation::UploadVideo]);
}

#[tokio::test]
async fn test_incomplete_credentials_fail_each_job_fatally() {
    let ws = Workspace::new();
    let config = ws.write("relay.toml", b"app_id = \"app-1\"\n");
    let video = ws.write("video.mp4", &[0u8; 64]);
    let api = Arc::new(RecordingDistributionApi::new("vid-1"));
    let engine = engine(&ws, &config, api.clone()).await;

    let mut job: JobData = serde_json::from_value(json!({
        "operation": "submit",
        "distribution_profile": profile(),
        "provider_data": { "video_asset_file_path": video.display().to_string() }
    }))
    .unwrap();

    let err = engine.execute(&mut job).await.unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert_eq!(err.disposition(), Disposition::Fatal);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_retryable_and_leaves_job_unsubmitted() {
    let ws = Workspace::new();
    let config = ws.write("relay.toml", b"app_id = \"app-1\"\napp_secret = \"s3cret\"\n");
    let video = ws.write("video.mp4", &[0u8; 64]);
    let api = Arc::new(
        RecordingDistributionApi::new("vid-1").fail_on(
            ApiOperation::UploadVideo,
            relay_core::port::ApiError::Transport("connection reset".to_string()),
        ),
    );
    let engine = engine(&ws, &config, api.clone()).await;

    let mut job: JobData = serde_json::from_value(json!({
        "operation": "submit",
        "distribution_profile": profile(),
        "provider_data": { "video_asset_file_path": video.display().to_string() }
    }))
    .unwrap();

    let err = engine.execute(&mut job).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().starts_with("Failed to upload video, reason:"));
    match job {
        JobData::Submit(data) => assert!(data.remote_id.is_none()),
        other => panic!("unexpected job: {:?}", other),
    }
}
