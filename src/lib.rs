//! HTTP endpoint that stores raw PCM uploads as mono 16 kHz 16-bit WAV files.

pub mod audio;
pub mod config;
pub mod logger;
pub mod server;
pub mod storage;
pub mod types;
pub mod utils;

pub use audio::{create_wav_header, WavFormat, WavHeader, WAV_HEADER_LEN};
pub use config::{AppConfig, ConfigError};
pub use server::{build_router, serve, AppState, ServerError};
pub use storage::{AudioStore, StorageError};
