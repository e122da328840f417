pub mod wav;

pub use wav::{create_wav_header, WavFormat, WavHeader, WAV_HEADER_LEN};
