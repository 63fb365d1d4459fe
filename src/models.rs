use serde::{Deserialize, Serialize};
use std::fmt;

use crate::playlist::utils::duration_to_seconds;

/// One of the ten fixed class segments, in class order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Warmup,
    Squats,
    Chest,
    Back,
    Triceps,
    Biceps,
    Lunges,
    Shoulders,
    Core,
    Cooldown,
}

impl Slot {
    pub const COUNT: usize = 10;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::Warmup,
        Slot::Squats,
        Slot::Chest,
        Slot::Back,
        Slot::Triceps,
        Slot::Biceps,
        Slot::Lunges,
        Slot::Shoulders,
        Slot::Core,
        Slot::Cooldown,
    ];

    /// Zero-based position in the playlist
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based position as printed in slot labels
    pub fn ordinal(self) -> usize {
        self.index() + 1
    }

    pub fn body_part(self) -> &'static str {
        match self {
            Slot::Warmup => "Warmup",
            Slot::Squats => "Squats",
            Slot::Chest => "Chest",
            Slot::Back => "Back",
            Slot::Triceps => "Triceps",
            Slot::Biceps => "Biceps",
            Slot::Lunges => "Lunges",
            Slot::Shoulders => "Shoulders",
            Slot::Core => "Core",
            Slot::Cooldown => "Cooldown",
        }
    }

    /// Catalog label, e.g. "3 - Chest"
    pub fn label(self) -> String {
        format!("{} - {}", self.ordinal(), self.body_part())
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Self::ALL.get(index).copied()
    }

    /// Resolve a catalog label. Accepts the full label or the bare ordinal ("3").
    pub fn from_label(label: &str) -> Option<Slot> {
        let label = label.trim();
        let (ordinal, rest) = match label.split_once('-') {
            Some((ordinal, rest)) => (ordinal.trim(), Some(rest.trim())),
            None => (label, None),
        };
        let slot = ordinal
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)?;

        match rest {
            Some(body_part) if !body_part.eq_ignore_ascii_case(slot.body_part()) => None,
            _ => Some(slot),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.ordinal(), self.body_part())
    }
}

/// A catalog row exactly as the CSV source hands it over
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Track No#", default)]
    pub track_no: Option<String>,
    #[serde(rename = "Song Title", default)]
    pub song_title: Option<String>,
    #[serde(rename = "Artist", default)]
    pub artist: Option<String>,
    #[serde(rename = "Release", default)]
    pub release: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Duration", default)]
    pub duration: Option<String>,
    #[serde(rename = "Tags", default)]
    pub tags: Option<String>,
}

/// A normalized catalog track. Built only by the catalog normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub slot: Slot,
    pub song_title: String,
    pub artist: String,
    pub release: String,
    pub genre: String,
    pub duration: String, // "M:SS" or "-"
    pub tags: Option<String>, // sorted, deduplicated, ", "-joined
    pub sort_key: f64,
}

impl Track {
    /// Identity used wherever "the same track" matters
    pub fn identity(&self) -> (&str, &str) {
        (&self.release, &self.song_title)
    }

    pub fn same_track(&self, other: &Track) -> bool {
        self.identity() == other.identity()
    }

    /// Stable hex key for listing rows
    pub fn key(&self) -> String {
        let base = format!(
            "{}_{}_{}_{}",
            self.slot.label(),
            self.song_title,
            self.artist,
            self.release
        );
        format!("{:x}", md5::compute(base))
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_list().contains(&tag)
    }

    pub fn duration_seconds(&self) -> u32 {
        duration_to_seconds(&self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_labels_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_label(&slot.label()), Some(slot));
            assert_eq!(Slot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(Slot::Warmup.label(), "1 - Warmup");
        assert_eq!(Slot::Cooldown.label(), "10 - Cooldown");
        assert_eq!(Slot::Core.to_string(), "9 - Core");
    }

    #[test]
    fn test_slot_from_label_rejects_unknown() {
        assert_eq!(Slot::from_label("11 - Stretch"), None);
        assert_eq!(Slot::from_label("0 - Warmup"), None);
        assert_eq!(Slot::from_label("3 - Biceps"), None);
        assert_eq!(Slot::from_label(""), None);
        assert_eq!(Slot::from_label(" 4 "), Some(Slot::Back));
    }

    #[test]
    fn test_tag_helpers() {
        let track = Track {
            slot: Slot::Chest,
            song_title: "Applause".to_string(),
            artist: "Lady Gaga".to_string(),
            release: "100".to_string(),
            genre: "Pop".to_string(),
            duration: "4:05".to_string(),
            tags: Some("Hard, Women of Pop".to_string()),
            sort_key: 100.0,
        };

        assert_eq!(track.tag_list(), vec!["Hard", "Women of Pop"]);
        assert!(track.has_tag("Women of Pop"));
        assert!(!track.has_tag("Women"));
        assert_eq!(track.duration_seconds(), 245);
        assert_eq!(track.key().len(), 32);
        assert_eq!(track.identity(), ("100", "Applause"));
    }
}
