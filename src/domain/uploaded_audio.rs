use bytes::Bytes;

const AUDIO_MEDIA_PREFIX: &str = "audio/";

/// An audio file as received from the client, before anything is written to disk.
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    pub original_filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedAudio {
    pub fn new(
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn is_audio(&self) -> bool {
        is_audio_media_type(&self.content_type)
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// True when the declared type is `audio/*`. Parameters after `;` are ignored.
pub fn is_audio_media_type(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    essence
        .get(..AUDIO_MEDIA_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(AUDIO_MEDIA_PREFIX))
}
