use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimeType {
    value: String,
    extension: String,
}

impl MimeType {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Detects a supported format from the leading bytes of `data`.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        ["image/png", "image/jpeg", "image/gif", "image/webp"]
            .into_iter()
            .filter_map(|value| Self::try_from(value.to_string()).ok())
            .find(|mime_type| mime_type.matches_signature(data))
    }

    /// Checks the leading bytes of `data` against this format's signature.
    pub fn matches_signature(&self, data: &[u8]) -> bool {
        match self.value.as_str() {
            "image/png" => data.starts_with(b"\x89PNG\r\n\x1a\n"),
            "image/jpeg" => data.starts_with(&[0xff, 0xd8, 0xff]),
            "image/gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
            "image/webp" => data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP",
            _ => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MimeTypeTryFromError {
    #[error("Unsupported MIME type: {0}")]
    Unsupported(String),
}

impl TryFrom<String> for MimeType {
    type Error = MimeTypeTryFromError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let extension = match value.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => return Err(MimeTypeTryFromError::Unsupported(value)),
        };
        Ok(Self {
            extension: extension.to_string(),
            value,
        })
    }
}
