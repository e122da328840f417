use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::audio::{create_wav_header, WAV_HEADER_LEN};
use crate::types::UploadReceipt;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to create {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to write WAV header to {path:?}: {source}")]
    WriteHeader { path: PathBuf, source: io::Error },
    #[error("failed to write audio data to {path:?}: {source}")]
    WriteData { path: PathBuf, source: io::Error },
}

/// Directory that receives uploaded recordings as WAV files.
///
/// Holds no state besides the directory path; concurrent uploads with the
/// same filename overwrite each other.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `dir`, creating it first when `auto_create` is set.
    ///
    /// Runs at startup only; the error is not an upload failure.
    pub fn open<P: Into<PathBuf>>(dir: P, auto_create: bool) -> io::Result<Self> {
        let store = Self::new(dir);
        if auto_create {
            std::fs::create_dir_all(&store.dir)?;
            info!("Storage directory ready at: {}", store.dir.display());
        } else if !store.dir.is_dir() {
            // uploads fail with 500 until the directory appears
            warn!("Storage directory {} does not exist", store.dir.display());
        }
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `header || pcm` to `<dir>/<filename>`, replacing any existing file.
    ///
    /// A failed write leaves whatever reached the disk in place.
    pub async fn store_wav(&self, filename: &str, pcm: &[u8]) -> Result<UploadReceipt, StorageError> {
        let path = self.dir.join(filename);
        let header = create_wav_header(pcm.len());

        let mut file = File::create(&path).await.map_err(|source| StorageError::Create {
            path: path.clone(),
            source,
        })?;

        file.write_all(&header).await.map_err(|source| StorageError::WriteHeader {
            path: path.clone(),
            source,
        })?;

        let write_data = async {
            file.write_all(pcm).await?;
            // tokio only hands buffered bytes to the OS on flush
            file.flush().await
        };
        write_data.await.map_err(|source| StorageError::WriteData {
            path: path.clone(),
            source,
        })?;

        Ok(UploadReceipt {
            filename: filename.to_string(),
            path,
            bytes_written: (WAV_HEADER_LEN + pcm.len()) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_header_then_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path());
        let pcm: Vec<u8> = (0..=255u8).collect();

        let receipt = store.store_wav("01_01_2024_00_00_00.wav", &pcm).await.unwrap();
        assert_eq!(receipt.path, dir.path().join("01_01_2024_00_00_00.wav"));
        assert_eq!(receipt.bytes_written, 300);

        let written = std::fs::read(&receipt.path).unwrap();
        assert_eq!(written.len(), 300);
        assert_eq!(&written[..WAV_HEADER_LEN], &create_wav_header(256));
        assert_eq!(&written[WAV_HEADER_LEN..], &pcm[..]);
    }

    #[tokio::test]
    async fn same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path());

        store.store_wav("clash.wav", &[1u8; 64]).await.unwrap();
        store.store_wav("clash.wav", &[2u8; 4]).await.unwrap();

        let written = std::fs::read(dir.path().join("clash.wav")).unwrap();
        assert_eq!(written.len(), WAV_HEADER_LEN + 4);
        assert_eq!(&written[WAV_HEADER_LEN..], &[2u8; 4]);
    }

    #[tokio::test]
    async fn missing_directory_fails_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path().join("absent"));

        let err = store.store_wav("x.wav", &[0u8; 10]).await.unwrap_err();
        assert!(matches!(err, StorageError::Create { .. }), "{err}");
        assert!(!dir.path().join("absent").exists());
    }

    #[test]
    fn open_creates_directory_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("audio");

        let store = AudioStore::open(&target, true).unwrap();
        assert!(target.is_dir());
        assert_eq!(store.dir(), target.as_path());

        let lazy = AudioStore::open(dir.path().join("later"), false).unwrap();
        assert!(!lazy.dir().exists());
    }

    #[test]
    fn open_reports_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(AudioStore::open(blocker.join("audio"), true).is_err());
    }
}
