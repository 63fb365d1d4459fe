use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::models::{RawRow, Slot, Track};

/// Latest release assumed when the catalog holds no usable release
pub const DEFAULT_LATEST_RELEASE: &str = "135";

/// Earliest-release cutoff used until a catalog is loaded
pub const DEFAULT_EARLIEST_RELEASE: &str = "60";

/// The special "United" release sits between 113 and 114
const UNITED_RELEASE: &str = "United";
const UNITED_SORT_KEY: f64 = 113.5;

/// Legacy tag spellings and their current replacements
const TAG_REPLACEMENTS: [(&str, &str); 2] = [("Break-up Songs", "Break-Up Songs"), ("🌈", "✨")];

/// Normalized catalog, sorted ascending by release sort key
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
    latest_release_id: String,
    all_release_ids: Vec<String>,
}

impl Catalog {
    pub fn empty(default_latest: &str) -> Self {
        Self {
            tracks: Vec::new(),
            latest_release_id: default_latest.to_string(),
            all_release_ids: Vec::new(),
        }
    }

    /// Normalize raw rows into a catalog. Rows without a known slot label are dropped.
    pub fn from_rows(rows: Vec<RawRow>, default_latest: &str) -> Self {
        let row_count = rows.len();
        let mut tracks: Vec<Track> = rows.into_iter().filter_map(normalize_row).collect();

        // Stable: equal keys keep input order
        tracks.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));

        let mut latest_key = 0.0;
        let mut latest_release_id = default_latest.to_string();
        let mut seen = HashSet::new();
        let mut all_release_ids = Vec::new();

        for track in &tracks {
            if seen.insert(track.release.as_str()) {
                all_release_ids.push(track.release.clone());
            }
            if track.sort_key > latest_key {
                latest_key = track.sort_key;
                latest_release_id = track.release.clone();
            }
        }

        info!(
            rows = row_count,
            tracks = tracks.len(),
            releases = all_release_ids.len(),
            latest = %latest_release_id,
            "Catalog normalized"
        );

        Self {
            tracks,
            latest_release_id,
            all_release_ids,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn latest_release_id(&self) -> &str {
        &self.latest_release_id
    }

    /// Distinct releases, ascending by sort key
    pub fn all_release_ids(&self) -> &[String] {
        &self.all_release_ids
    }

    pub fn earliest_release(&self) -> Option<&str> {
        self.all_release_ids.first().map(String::as_str)
    }

    /// Distinct non-empty genres, lexicographic
    pub fn genres(&self) -> Vec<String> {
        self.tracks
            .iter()
            .map(|track| track.genre.as_str())
            .filter(|genre| !genre.is_empty() && *genre != "nan")
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct tag tokens across all tracks, lexicographic
    pub fn tags(&self) -> Vec<String> {
        self.tracks
            .iter()
            .flat_map(Track::tag_list)
            .filter(|tag| *tag != "nan")
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn release_track_count(&self, release: &str) -> usize {
        self.tracks
            .iter()
            .filter(|track| track.release == release)
            .count()
    }
}

/// Chronological key for a release identifier
pub fn release_sort_key(release: &str) -> f64 {
    let release = release.trim();
    if release == UNITED_RELEASE {
        return UNITED_SORT_KEY;
    }
    match release.parse::<f64>() {
        Ok(key) if key.is_finite() => key,
        _ => 0.0,
    }
}

/// Canonical composed form, trimmed
pub fn normalize_text(text: &str) -> String {
    text.trim().nfc().collect()
}

/// Clean a raw tag field into a sorted, deduplicated list, or None when there are no tags
pub fn clean_tags(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw == "None" || raw == "-" {
        return None;
    }

    let cleaned: BTreeSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && !tag.eq_ignore_ascii_case("nan") && *tag != "None")
        .map(|tag| {
            let tag = normalize_text(tag);
            TAG_REPLACEMENTS
                .iter()
                .find(|(legacy, _)| *legacy == tag)
                .map(|(_, current)| current.to_string())
                .unwrap_or(tag)
        })
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_iter().collect::<Vec<_>>().join(", "))
    }
}

fn normalize_row(row: RawRow) -> Option<Track> {
    let label = row.track_no.as_deref().unwrap_or_default();
    let Some(slot) = Slot::from_label(label) else {
        debug!(
            label,
            title = row.song_title.as_deref().unwrap_or_default(),
            "Dropping row with unknown slot label"
        );
        return None;
    };

    let release = row.release.as_deref().unwrap_or_default().trim().to_string();
    let duration = match row.duration.as_deref().map(str::trim) {
        Some(duration) if !duration.is_empty() => duration.to_string(),
        _ => "-".to_string(),
    };

    Some(Track {
        slot,
        song_title: normalize_text(row.song_title.as_deref().unwrap_or_default()),
        artist: normalize_text(row.artist.as_deref().unwrap_or_default()),
        genre: normalize_text(row.genre.as_deref().unwrap_or_default()),
        tags: clean_tags(row.tags.as_deref()),
        sort_key: release_sort_key(&release),
        release,
        duration,
    })
}
