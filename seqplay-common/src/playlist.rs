//! Playlist and track locator types
//!
//! The playlist is a fixed ordered list of track locators supplied at
//! startup. It is never mutated after construction; the session cursor is
//! the only moving part.

use serde::{Deserialize, Serialize};

/// Identifier/address of a playable audio resource (a URI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackLocator(String);

impl TrackLocator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackLocator {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrackLocator {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TrackLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable ordered sequence of track locators, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<TrackLocator>,
}

impl Playlist {
    /// Create a playlist from an ordered list of locators
    pub fn new(tracks: Vec<TrackLocator>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Locator at `index`, or None if out of range
    pub fn get(&self, index: usize) -> Option<&TrackLocator> {
        self.tracks.get(index)
    }

    /// Index of the final track, or None for an empty playlist
    pub fn last_index(&self) -> Option<usize> {
        self.tracks.len().checked_sub(1)
    }

    /// All locators in playback order
    pub fn tracks(&self) -> &[TrackLocator] {
        &self.tracks
    }
}

impl FromIterator<TrackLocator> for Playlist {
    fn from_iter<I: IntoIterator<Item = TrackLocator>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(n: usize) -> Playlist {
        (0..n)
            .map(|i| TrackLocator::from(format!("https://example.com/{i}.mp3")))
            .collect()
    }

    #[test]
    fn test_indexing() {
        let p = playlist(3);
        assert_eq!(p.len(), 3);
        assert_eq!(p.get(0).unwrap().as_str(), "https://example.com/0.mp3");
        assert_eq!(p.get(2).unwrap().as_str(), "https://example.com/2.mp3");
        assert!(p.get(3).is_none());
        assert_eq!(p.last_index(), Some(2));
    }

    #[test]
    fn test_empty() {
        let p = playlist(0);
        assert!(p.is_empty());
        assert_eq!(p.last_index(), None);
    }

    #[test]
    fn test_locator_serde_transparent() {
        let loc = TrackLocator::from("https://example.com/a.mp3");
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "\"https://example.com/a.mp3\"");
    }
}
