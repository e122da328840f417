use std::path::PathBuf;

use crate::audio::WavFormat;

/// Query string of `POST /audio`.
///
/// Both fields are informational: they are logged, never validated, and the
/// stored header always uses the fixed format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadParams {
    pub uid: Option<String>,
    pub sample_rate: Option<String>,
}

impl UploadParams {
    /// First value of each known key wins; repeats and unknown keys are ignored.
    pub fn from_query_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "uid" => &mut params.uid,
                "sample_rate" => &mut params.sample_rate,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Requested rate when it parses and differs from what gets stored.
    pub fn mismatched_sample_rate(&self, stored: &WavFormat) -> Option<u32> {
        self.sample_rate
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&rate| rate != stored.sample_rate)
    }
}

/// Outcome of a stored upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub filename: String,
    pub path: PathBuf,
    pub bytes_written: u64,
}

impl UploadReceipt {
    /// Plain-text body returned to the uploader.
    pub fn message(&self) -> String {
        format!("Audio bytes received and uploaded as {}", self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sample_rate: Option<&str>) -> UploadParams {
        UploadParams {
            uid: Some("device-1".to_string()),
            sample_rate: sample_rate.map(str::to_string),
        }
    }

    #[test]
    fn detects_mismatched_rate() {
        let fixed = WavFormat::MONO_16K_PCM16;
        assert_eq!(params(Some("44100")).mismatched_sample_rate(&fixed), Some(44_100));
        assert_eq!(params(Some("16000")).mismatched_sample_rate(&fixed), None);
        assert_eq!(params(Some("fast")).mismatched_sample_rate(&fixed), None);
        assert_eq!(params(None).mismatched_sample_rate(&fixed), None);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn first_value_of_repeated_key_wins() {
        let parsed = UploadParams::from_query_pairs(pairs(&[
            ("uid", "a"),
            ("sample_rate", "8000"),
            ("uid", "b"),
            ("sample_rate", "16000"),
            ("extra", "ignored"),
        ]));
        assert_eq!(parsed.uid.as_deref(), Some("a"));
        assert_eq!(parsed.sample_rate.as_deref(), Some("8000"));
    }

    #[test]
    fn empty_query_gives_no_params() {
        assert_eq!(UploadParams::from_query_pairs(Vec::new()), UploadParams::default());
    }

    #[test]
    fn receipt_message_names_file() {
        let receipt = UploadReceipt {
            filename: "01_02_2024_03_04_05.wav".to_string(),
            path: PathBuf::from("audio/01_02_2024_03_04_05.wav"),
            bytes_written: 144,
        };
        assert_eq!(
            receipt.message(),
            "Audio bytes received and uploaded as 01_02_2024_03_04_05.wav"
        );
    }
}
