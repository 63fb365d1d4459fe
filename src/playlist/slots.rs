use serde::Serialize;

use crate::models::{Slot, Track};
use crate::playlist::utils::seconds_to_duration;

/// The 10-slot class playlist. Index `i` holds the track for slot ordinal `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Playlist {
    slots: [Option<Track>; Slot::COUNT],
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: [Option<Track>; Slot::COUNT]) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: Slot) -> Option<&Track> {
        self.slots[slot.index()].as_ref()
    }

    /// Replace a slot. The track's own slot label is not checked against `slot`.
    pub fn set_slot(&mut self, slot: Slot, track: Track) {
        self.slots[slot.index()] = Some(track);
    }

    pub fn clear_slot(&mut self, slot: Slot) {
        self.slots[slot.index()] = None;
    }

    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn replace_all(&mut self, slots: [Option<Track>; Slot::COUNT]) {
        self.slots = slots;
    }

    /// Slots in class order with their occupants
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&Track>)> {
        Slot::ALL
            .into_iter()
            .zip(self.slots.iter())
            .map(|(slot, track)| (slot, track.as_ref()))
    }

    pub fn occupied(&self) -> impl Iterator<Item = &Track> {
        self.slots.iter().flatten()
    }

    pub fn empty_slots(&self) -> Vec<Slot> {
        self.iter()
            .filter(|(_, track)| track.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Titles of every occupied slot, in slot order
    pub fn occupied_titles(&self) -> Vec<String> {
        self.occupied().map(|track| track.song_title.clone()).collect()
    }

    pub fn has_any_occupied(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether this exact track (release + title) is already selected
    pub fn contains_track(&self, track: &Track) -> bool {
        self.occupied().any(|selected| selected.same_track(track))
    }

    /// The track's own slot, if that slot is still open
    pub fn first_open_slot_for(&self, track: &Track) -> Option<Slot> {
        self.get(track.slot).is_none().then_some(track.slot)
    }

    pub fn total_seconds(&self) -> u32 {
        self.occupied().map(Track::duration_seconds).sum()
    }

    /// Total running time as "M:SS"
    pub fn total_duration(&self) -> String {
        seconds_to_duration(self.total_seconds())
    }
}
