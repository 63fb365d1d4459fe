use crate::models::Track;

/// Stylized artist spelling and its plain-letter equivalent
const STYLIZED_NAME: &str = "p!nk";
const PLAIN_NAME: &str = "pink";

/// Free-text search over title and artist
pub struct TrackSearch;

impl TrackSearch {
    /// Lowercase a field and make the stylized name findable under both spellings
    pub fn normalize_for_search(text: &str) -> String {
        text.to_lowercase()
            .replacen(STYLIZED_NAME, PLAIN_NAME, 1)
            .replacen(PLAIN_NAME, &format!("{STYLIZED_NAME} {PLAIN_NAME}"), 1)
    }

    /// Does a track match the already-lowercased search words
    pub fn matches(track: &Track, words: &[&str]) -> bool {
        let title = track.song_title.to_lowercase();
        let artist = track.artist.to_lowercase();
        let normalized_title = Self::normalize_for_search(&title);
        let normalized_artist = Self::normalize_for_search(&artist);

        match words {
            [] => true,
            [word] => {
                title.contains(word)
                    || artist.contains(word)
                    || normalized_title.contains(word)
                    || normalized_artist.contains(word)
            }
            _ => {
                words.iter().all(|word| normalized_title.contains(word))
                    || words.iter().all(|word| normalized_artist.contains(word))
            }
        }
    }

    /// Filter tracks by a search term, preserving input order.
    /// A blank term returns the input unchanged.
    pub fn search(tracks: &[Track], term: &str) -> Vec<Track> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return tracks.to_vec();
        }

        let words: Vec<&str> = term.split_whitespace().collect();
        tracks
            .iter()
            .filter(|track| Self::matches(track, &words))
            .cloned()
            .collect()
    }
}
