use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::Playlist;
use crate::models::{Slot, Track};

/// Source of uniform random indices
#[cfg_attr(test, mockall::automock)]
pub trait IndexSource {
    /// Return an index in `0..bound`. Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: IndexSource + ?Sized> IndexSource for Box<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// `IndexSource` backed by the `rand` standard generator
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible draws for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IndexSource for RngSource {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Main playlist generator
pub struct PlaylistGenerator<R: IndexSource> {
    source: R,
}

impl<R: IndexSource> PlaylistGenerator<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Pick one track for `slot` uniformly at random, skipping excluded titles
    pub fn pick_random<'a>(
        &mut self,
        tracks: &'a [Track],
        slot: Slot,
        exclude_titles: &[String],
    ) -> Option<&'a Track> {
        let available: Vec<&Track> = tracks
            .iter()
            .filter(|track| track.slot == slot)
            .filter(|track| !exclude_titles.contains(&track.song_title))
            .collect();

        if available.is_empty() {
            debug!(slot = %slot, excluded = exclude_titles.len(), "No eligible track for slot");
            return None;
        }

        let bound = available.len();
        let index = self.source.next_index(bound);
        debug_assert!(
            index < bound,
            "index source returned out of range index {index} for bound {bound}"
        );
        let picked = available.get(index).copied();
        if picked.is_none() {
            warn!(slot = %slot, index, bound, "Index source returned an out of range index");
        }
        picked
    }

    /// Fill all ten slots in order, never repeating a title
    pub fn generate_playlist(&mut self, tracks: &[Track]) -> Playlist {
        let mut used_titles: Vec<String> = Vec::new();
        let mut slots: [Option<Track>; Slot::COUNT] = Default::default();

        for slot in Slot::ALL {
            if let Some(track) = self.pick_random(tracks, slot, &used_titles) {
                used_titles.push(track.song_title.clone());
                slots[slot.index()] = Some(track.clone());
            }
        }

        let playlist = Playlist::from_slots(slots);
        debug!(
            pool = tracks.len(),
            empty_slots = playlist.empty_slots().len(),
            "Generated playlist"
        );
        playlist
    }

    /// Choose a replacement for one slot that differs from every title already in the playlist
    pub fn randomize_slot(
        &mut self,
        tracks: &[Track],
        playlist: &Playlist,
        slot: Slot,
    ) -> Option<Track> {
        let exclude_titles = playlist.occupied_titles();
        self.pick_random(tracks, slot, &exclude_titles).cloned()
    }
}
