use std::{fmt::Display, path::Path};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum FileType {
    MP3,
    M4A,
    OGG,
    WAV,
    FLAC,
    AAC,
    #[default]
    ERR,
}

impl From<&str> for FileType {
    fn from(str: &str) -> Self {
        match str.to_ascii_lowercase().as_str() {
            "mp3" => Self::MP3,
            "m4a" | "mp4" => Self::M4A,
            "ogg" | "oga" => Self::OGG,
            "flac" => Self::FLAC,
            "wav" | "wave" => Self::WAV,
            "aac" | "adts" => Self::AAC,
            _ => Self::ERR,
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            FileType::MP3 => write!(f, "ᵐᵖ³"),
            FileType::M4A => write!(f, "ᵐ⁴ᵃ"),
            FileType::OGG => write!(f, "ᵒᵍᵍ"),
            FileType::WAV => write!(f, "ʷᵃᵛ"),
            FileType::FLAC => write!(f, "ᶠˡᵃᶜ"),
            FileType::AAC => write!(f, "ᵃᵃᶜ"),
            FileType::ERR => write!(f, "ERR"),
        }
    }
}

impl FileType {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from)
            .unwrap_or_default()
    }

    pub fn is_playable(&self) -> bool {
        *self != FileType::ERR
    }
}
