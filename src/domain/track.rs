use serde::{Deserialize, Serialize};

/// Placeholders stored in place of a missing image.
const NO_ARTWORK: [&str; 2] = ["No Artwork", "No Secondary Artwork"];

/// A playable item in the track sequence.
///
/// Serialized with camelCase keys so the persisted `trackList`
/// record keeps the same shape across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_secondary: Option<String>,
}

impl Track {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Track {
            url: url.into(),
            name: name.into(),
            artwork: None,
            artwork_secondary: None,
        }
    }

    pub fn with_artwork(mut self, artwork: Option<String>) -> Self {
        self.artwork = normalize_artwork(artwork);
        self
    }

    pub fn with_secondary_artwork(mut self, artwork: Option<String>) -> Self {
        self.artwork_secondary = normalize_artwork(artwork);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
}

fn normalize_artwork(artwork: Option<String>) -> Option<String> {
    artwork
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty() && !NO_ARTWORK.contains(&a.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_artwork_is_dropped() {
        let track = Track::new("/m/a.mp3", "A")
            .with_artwork(Some("No Artwork".into()))
            .with_secondary_artwork(Some("  ".into()));

        assert_eq!(track.artwork, None);
        assert_eq!(track.artwork_secondary, None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let track = Track::new("/m/a.mp3", "A")
            .with_secondary_artwork(Some("/m/vinyl.png".into()));
        let json = serde_json::to_string(&track).unwrap();

        assert!(json.contains("\"artworkSecondary\":\"/m/vinyl.png\""));
        assert!(!json.contains("\"artwork\":"));

        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }
}
