// Video upload: single request for small files, resumable session for large ones

use relay_core::port::{ApiError, VideoUpload};
use reqwest::multipart::{Form, Part};
use std::io::SeekFrom;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, info};

use crate::client::{auth_form, file_part, io_error, with_metadata, GraphDistributionApi};
use crate::response::{decode, expect_success, ChunkWindow, IdResponse, UploadSession};

impl GraphDistributionApi {
    /// One multipart POST carrying the whole file
    pub(crate) async fn upload_single(
        &self,
        auth: &[(&'static str, String)],
        upload: &VideoUpload<'_>,
    ) -> Result<String, ApiError> {
        let form = with_metadata(auth_form(auth), upload.metadata)
            .part("source", file_part(upload.video_path, file_name(upload.video_path)).await?);
        let form = attach_thumb(form, upload.thumb_path).await?;

        let url = self.config.video_url(&format!("{}/videos", upload.page_id));
        let (status, body) = self.send(self.http.post(url).multipart(form)).await?;
        let created: IdResponse = decode(status, &body)?;

        info!(video_id = %created.id, bytes = upload.file_size, "Graph video uploaded");
        Ok(created.id)
    }

    /// start -> transfer* -> finish, following the offsets the server hands back
    pub(crate) async fn upload_resumable(
        &self,
        auth: &[(&'static str, String)],
        upload: &VideoUpload<'_>,
    ) -> Result<String, ApiError> {
        let url = self.config.video_url(&format!("{}/videos", upload.page_id));

        let start = auth_form(auth)
            .text("upload_phase", "start")
            .text("file_size", upload.file_size.to_string());
        let (status, body) = self.send(self.http.post(&url).multipart(start)).await?;
        let session: UploadSession = decode(status, &body)?;
        info!(
            video_id = %session.video_id,
            upload_session_id = %session.upload_session_id,
            bytes = upload.file_size,
            "Graph resumable upload started"
        );

        let mut file = tokio::fs::File::open(upload.video_path)
            .await
            .map_err(|e| io_error(upload.video_path, e))?;
        let mut window = checked_window(session.window, upload.file_size)?;

        while !window.is_complete() {
            let chunk = read_chunk(&mut file, upload.video_path, window).await?;
            debug!(
                start_offset = window.start_offset,
                end_offset = window.end_offset,
                "Transferring chunk"
            );

            let transfer = auth_form(auth)
                .text("upload_phase", "transfer")
                .text("upload_session_id", session.upload_session_id.clone())
                .text("start_offset", window.start_offset.to_string())
                .part("video_file_chunk", Part::bytes(chunk).file_name("chunk"));
            let (status, body) = self.send(self.http.post(&url).multipart(transfer)).await?;
            let next = checked_window(decode::<ChunkWindow>(status, &body)?, upload.file_size)?;

            if !next.is_complete() && next.start_offset <= window.start_offset {
                return Err(ApiError::InvalidResponse(format!(
                    "Upload session {} made no progress at offset {}",
                    session.upload_session_id, window.start_offset
                )));
            }
            window = next;
        }

        let finish = with_metadata(auth_form(auth), upload.metadata)
            .text("upload_phase", "finish")
            .text("upload_session_id", session.upload_session_id.clone());
        let finish = attach_thumb(finish, upload.thumb_path).await?;
        let (status, body) = self.send(self.http.post(&url).multipart(finish)).await?;
        expect_success(status, &body)?;

        info!(video_id = %session.video_id, "Graph resumable upload finished");
        Ok(session.video_id)
    }
}

/// Reject offsets outside the file before they size any read
fn checked_window(window: ChunkWindow, file_size: u64) -> Result<ChunkWindow, ApiError> {
    if window.start_offset > window.end_offset || window.end_offset > file_size {
        return Err(ApiError::InvalidResponse(format!(
            "Upload window {}..{} outside file of {} bytes",
            window.start_offset, window.end_offset, file_size
        )));
    }
    Ok(window)
}

async fn attach_thumb(form: Form, thumb_path: Option<&Path>) -> Result<Form, ApiError> {
    match thumb_path {
        Some(path) => Ok(form.part("thumb", file_part(path, file_name(path)).await?)),
        None => Ok(form),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

/// Read exactly the bytes of `window` from `file`
async fn read_chunk(
    file: &mut tokio::fs::File,
    path: &Path,
    window: ChunkWindow,
) -> Result<Vec<u8>, ApiError> {
    file.seek(SeekFrom::Start(window.start_offset))
        .await
        .map_err(|e| io_error(path, e))?;

    let mut chunk = Vec::new();
    (&mut *file)
        .take(window.len())
        .read_to_end(&mut chunk)
        .await
        .map_err(|e| io_error(path, e))?;

    if chunk.len() as u64 != window.len() {
        return Err(ApiError::Io(format!(
            "{}: expected {} bytes at offset {}, read {}",
            path.display(),
            window.len(),
            window.start_offset,
            chunk.len()
        )));
    }
    Ok(chunk)
}
