/// Length of the canonical RIFF/WAVE header (RIFF chunk + `fmt ` + `data` header).
pub const WAV_HEADER_LEN: usize = 44;

/// Size of the PCM `fmt ` sub-chunk body.
const FMT_CHUNK_SIZE: u32 = 16;
/// `audio_format` code for uncompressed PCM.
const PCM_FORMAT: u16 = 1;

/// PCM stream layout written into the `fmt ` sub-chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// The only format the upload endpoint stores: mono, 16 kHz, 16-bit.
    pub const MONO_16K_PCM16: WavFormat = WavFormat {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
    };

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample) / 8
    }

    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::MONO_16K_PCM16
    }
}

/// Field-by-field view of the 44-byte header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub subchunk1_size: u32,
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub subchunk2_size: u32,
}

impl WavHeader {
    /// Header describing `data_len` bytes of PCM in `format`.
    ///
    /// Size fields are 32-bit; lengths past `u32::MAX` wrap instead of being rejected.
    pub fn for_data_len(format: WavFormat, data_len: usize) -> Self {
        let data_size = data_len as u32;
        Self {
            chunk_size: data_size.wrapping_add(36),
            subchunk1_size: FMT_CHUNK_SIZE,
            audio_format: PCM_FORMAT,
            num_channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate(),
            block_align: format.block_align(),
            bits_per_sample: format.bits_per_sample,
            subchunk2_size: data_size,
        }
    }

    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut header = [0u8; WAV_HEADER_LEN];

        // RIFF chunk
        header[0..4].copy_from_slice(b"RIFF");
        header[4..8].copy_from_slice(&self.chunk_size.to_le_bytes());
        header[8..12].copy_from_slice(b"WAVE");

        // fmt sub-chunk
        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&self.subchunk1_size.to_le_bytes());
        header[20..22].copy_from_slice(&self.audio_format.to_le_bytes());
        header[22..24].copy_from_slice(&self.num_channels.to_le_bytes());
        header[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        header[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        header[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        header[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        // data sub-chunk
        header[36..40].copy_from_slice(b"data");
        header[40..44].copy_from_slice(&self.subchunk2_size.to_le_bytes());

        header
    }
}

/// Header for `data_len` bytes of mono 16 kHz 16-bit PCM.
pub fn create_wav_header(data_len: usize) -> [u8; WAV_HEADER_LEN] {
    WavHeader::for_data_len(WavFormat::MONO_16K_PCM16, data_len).to_bytes()
}
