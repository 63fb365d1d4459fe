use super::{FilterCriteria, RECENT_RELEASE_COUNT, ThemeCriteria};
use crate::catalog::release_sort_key;
use crate::models::{Slot, Track};

/// Track filtering functionality using static helper functions
pub struct TrackFilters;

impl TrackFilters {
    /// Sort keys of the most recent releases, or None when the option is off
    fn recent_sort_keys(criteria: &FilterCriteria) -> Option<Vec<f64>> {
        if !criteria.only_recent_releases || criteria.all_release_ids.is_empty() {
            return None;
        }
        let start = criteria
            .all_release_ids
            .len()
            .saturating_sub(RECENT_RELEASE_COUNT);
        Some(
            criteria.all_release_ids[start..]
                .iter()
                .map(|release| release_sort_key(release))
                .collect(),
        )
    }

    /// Check a track against the earliest-release cutoff
    pub fn matches_earliest_release(track: &Track, criteria: &FilterCriteria) -> bool {
        let Some(earliest) = &criteria.earliest_release else {
            return true;
        };
        track.sort_key >= release_sort_key(earliest)
    }

    /// Check that a track is not from the newest release, when that option is on
    pub fn is_not_newest_release(track: &Track, criteria: &FilterCriteria) -> bool {
        if !criteria.exclude_newest_release {
            return true;
        }
        match &criteria.latest_release_id {
            Some(latest) => track.release != *latest,
            None => true,
        }
    }

    /// Narrow tracks by release range. Order is preserved.
    pub fn filter_by_release(tracks: &[Track], criteria: &FilterCriteria) -> Vec<Track> {
        let recent_keys = Self::recent_sort_keys(criteria);

        tracks
            .iter()
            .filter(|track| Self::matches_earliest_release(track, criteria))
            .filter(|track| {
                recent_keys
                    .as_ref()
                    .is_none_or(|keys| keys.contains(&track.sort_key))
            })
            .filter(|track| Self::is_not_newest_release(track, criteria))
            .cloned()
            .collect()
    }

    /// OR within each tag category, AND across categories
    pub fn matches_theme_tags(track: &Track, criteria: &ThemeCriteria) -> bool {
        if !criteria.has_tag_filter() {
            return true;
        }

        let track_tags = track.tag_list();
        if track_tags.is_empty() {
            return false;
        }

        let has_theme_tag = criteria.theme_tags.is_empty()
            || track_tags.iter().any(|tag| criteria.theme_tags.contains(*tag));
        let has_instructor_tag = criteria.instructor_tags.is_empty()
            || track_tags
                .iter()
                .any(|tag| criteria.instructor_tags.contains(*tag));

        has_theme_tag && has_instructor_tag
    }

    pub fn matches_genres(track: &Track, criteria: &ThemeCriteria) -> bool {
        criteria.genres.is_empty() || criteria.genres.contains(&track.genre)
    }

    pub fn should_include_track(track: &Track, criteria: &ThemeCriteria) -> bool {
        Self::matches_theme_tags(track, criteria) && Self::matches_genres(track, criteria)
    }

    /// Narrow tracks by theme tags, instructor tags and genres. Order is preserved.
    pub fn filter_by_theme(tracks: &[Track], criteria: &ThemeCriteria) -> Vec<Track> {
        if criteria.is_empty() {
            return tracks.to_vec();
        }
        tracks
            .iter()
            .filter(|track| Self::should_include_track(track, criteria))
            .cloned()
            .collect()
    }

    pub fn tracks_for_slot(tracks: &[Track], slot: Slot) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| track.slot == slot)
            .cloned()
            .collect()
    }

    /// Number of tracks available for each slot, indexed by slot position
    pub fn slot_counts(tracks: &[Track]) -> [usize; Slot::COUNT] {
        let mut counts = [0; Slot::COUNT];
        for track in tracks {
            counts[track.slot.index()] += 1;
        }
        counts
    }

    /// Candidates to swap into a slot, leaving out the current occupant's title
    pub fn swap_options(tracks: &[Track], slot: Slot, current: Option<&Track>) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| track.slot == slot)
            .filter(|track| current.is_none_or(|current| track.song_title != current.song_title))
            .cloned()
            .collect()
    }
}
