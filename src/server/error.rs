use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::storage::StorageError;

/// Failure of a single upload request.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read request body: {0}")]
    BodyRead(axum::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::BodyRead(_) => StatusCode::BAD_REQUEST,
            UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed message sent to the caller; details stay in the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            UploadError::BodyRead(_) => "Failed to read request body",
            UploadError::Storage(StorageError::Create { .. }) => "Failed to create file",
            UploadError::Storage(StorageError::WriteHeader { .. }) => "Failed to write WAV header",
            UploadError::Storage(StorageError::WriteData { .. }) => "Failed to write audio data",
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        error!("Upload failed: {}", self);
        (self.status(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn storage(kind: fn(PathBuf, io::Error) -> StorageError) -> UploadError {
        UploadError::Storage(kind(PathBuf::from("audio/x.wav"), io::Error::other("disk full")))
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let cases = [
            (storage(|path, source| StorageError::Create { path, source }), "Failed to create file"),
            (storage(|path, source| StorageError::WriteHeader { path, source }), "Failed to write WAV header"),
            (storage(|path, source| StorageError::WriteData { path, source }), "Failed to write audio data"),
        ];
        for (err, message) in cases {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_message(), message);
        }
    }

    #[test]
    fn body_failure_is_client_error() {
        let err = UploadError::BodyRead(axum::Error::new(io::Error::other("connection reset")));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Failed to read request body");
        assert!(err.to_string().contains("connection reset"));
    }
}
