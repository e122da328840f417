use axum::body::Body;
use axum::extract::{Query, State};
use log::{info, warn};

use super::error::UploadError;
use super::AppState;
use crate::audio::WavFormat;
use crate::types::UploadParams;
use crate::utils::upload_filename_now;

/// `POST /audio`: buffer the body, prepend a WAV header and store it under a
/// timestamped name.
pub async fn handle_post_audio(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Body,
) -> Result<String, UploadError> {
    let params = UploadParams::from_query_pairs(pairs);
    info!("Received request from uid: {}", params.uid.as_deref().unwrap_or(""));
    info!("Requested sample rate: {}", params.sample_rate.as_deref().unwrap_or(""));
    if let Some(requested) = params.mismatched_sample_rate(&WavFormat::MONO_16K_PCM16) {
        warn!(
            "Requested sample rate {} Hz ignored, storing as {} Hz",
            requested,
            WavFormat::MONO_16K_PCM16.sample_rate
        );
    }

    let limit = state.max_body_bytes.unwrap_or(usize::MAX);
    let pcm = axum::body::to_bytes(body, limit)
        .await
        .map_err(UploadError::BodyRead)?;

    let filename = upload_filename_now();
    let receipt = state.store.store_wav(&filename, &pcm).await?;

    info!(
        "Stored {} bytes of audio as {} ({} bytes on disk)",
        pcm.len(),
        receipt.path.display(),
        receipt.bytes_written
    );
    Ok(receipt.message())
}
