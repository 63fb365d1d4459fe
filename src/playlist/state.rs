use std::collections::BTreeSet;

use tracing::{debug, info};

use super::filters::TrackFilters;
use super::generator::{IndexSource, PlaylistGenerator};
use super::search::TrackSearch;
use super::utils::PlaylistExport;
use super::{Playlist, ReleaseOptions, ThemeCriteria};
use crate::catalog::{Catalog, DEFAULT_EARLIEST_RELEASE, DEFAULT_LATEST_RELEASE};
use crate::models::{Slot, Track};

/// Everything a playlist-building session owns
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub catalog: Catalog,
    pub release: ReleaseOptions,
    pub theme: ThemeCriteria,
    pub playlist: Playlist,
    pub is_loading: bool,
}

impl SessionState {
    /// A session waiting for its catalog
    pub fn new(default_earliest: &str, default_latest: &str) -> Self {
        Self {
            catalog: Catalog::empty(default_latest),
            release: ReleaseOptions {
                earliest_release: Some(default_earliest.to_string()),
                ..Default::default()
            },
            theme: ThemeCriteria::default(),
            playlist: Playlist::new(),
            is_loading: true,
        }
    }

    /// Catalog narrowed by the release options
    pub fn filtered_tracks(&self) -> Vec<Track> {
        if self.is_loading {
            return Vec::new();
        }
        let criteria = self.release.criteria_for(&self.catalog);
        TrackFilters::filter_by_release(self.catalog.tracks(), &criteria)
    }

    /// Release-filtered tracks further narrowed by the theme selection
    pub fn themed_tracks(&self) -> Vec<Track> {
        TrackFilters::filter_by_theme(&self.filtered_tracks(), &self.theme)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_EARLIEST_RELEASE, DEFAULT_LATEST_RELEASE)
    }
}

/// State transitions. Each one is applied by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CatalogLoaded(Catalog),
    SetEarliestRelease(Option<String>),
    SetExcludeNewest(bool),
    SetOnlyRecent10(bool),
    /// `None` keeps the current selection for that category
    SetThemeFilters {
        theme_tags: Option<BTreeSet<String>>,
        instructor_tags: Option<BTreeSet<String>>,
        genres: Option<BTreeSet<String>>,
    },
    SetPlaylist(Playlist),
    SetTrack { slot: Slot, track: Track },
    ClearTrack(Slot),
    ClearPlaylist,
}

/// Apply one action to a state, producing the next state
pub fn reduce(mut state: SessionState, action: Action) -> SessionState {
    match action {
        Action::CatalogLoaded(catalog) => {
            if let Some(earliest) = catalog.earliest_release() {
                state.release.earliest_release = Some(earliest.to_string());
            }
            state.catalog = catalog;
            state.is_loading = false;
        }
        Action::SetEarliestRelease(release) => state.release.earliest_release = release,
        Action::SetExcludeNewest(exclude) => state.release.exclude_newest = exclude,
        Action::SetOnlyRecent10(only) => state.release.only_recent_10 = only,
        Action::SetThemeFilters {
            theme_tags,
            instructor_tags,
            genres,
        } => {
            if let Some(theme_tags) = theme_tags {
                state.theme.theme_tags = theme_tags;
            }
            if let Some(instructor_tags) = instructor_tags {
                state.theme.instructor_tags = instructor_tags;
            }
            if let Some(genres) = genres {
                state.theme.genres = genres;
            }
        }
        Action::SetPlaylist(playlist) => state.playlist = playlist,
        Action::SetTrack { slot, track } => state.playlist.set_slot(slot, track),
        Action::ClearTrack(slot) => state.playlist.clear_slot(slot),
        Action::ClearPlaylist => state.playlist.clear_all(),
    }
    state
}

/// Controller driving a session: owns the state and the random source
pub struct Session<R: IndexSource> {
    state: SessionState,
    generator: PlaylistGenerator<R>,
}

impl<R: IndexSource> Session<R> {
    pub fn new(state: SessionState, source: R) -> Self {
        Self {
            state,
            generator: PlaylistGenerator::new(source),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.state.playlist
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    fn slot_pool(&self, themed: bool) -> Vec<Track> {
        if themed {
            self.state.themed_tracks()
        } else {
            self.state.filtered_tracks()
        }
    }

    /// Fill the playlist from the release-filtered catalog
    pub fn generate_random(&mut self) {
        self.generate(false);
    }

    /// Fill the playlist from tracks matching the theme selection
    pub fn generate_themed(&mut self) {
        self.generate(true);
    }

    fn generate(&mut self, themed: bool) {
        if self.state.is_loading {
            debug!("Catalog still loading; generation skipped");
            return;
        }
        let pool = self.slot_pool(themed);
        let playlist = self.generator.generate_playlist(&pool);
        info!(
            themed,
            pool = pool.len(),
            filled = Slot::COUNT - playlist.empty_slots().len(),
            "Playlist generated"
        );
        self.dispatch(Action::SetPlaylist(playlist));
    }

    /// Swap one slot for a random track not already in the playlist.
    /// Returns false and leaves the slot untouched when no alternative exists.
    pub fn randomize_track(&mut self, slot: Slot, themed: bool) -> bool {
        if self.state.is_loading {
            return false;
        }
        let pool = self.slot_pool(themed);
        match self
            .generator
            .randomize_slot(&pool, &self.state.playlist, slot)
        {
            Some(track) => {
                self.dispatch(Action::SetTrack { slot, track });
                true
            }
            None => {
                debug!(slot = %slot, "No alternative track for slot");
                false
            }
        }
    }

    /// Search the release-filtered catalog
    pub fn search(&self, term: &str) -> Vec<Track> {
        TrackSearch::search(&self.state.filtered_tracks(), term)
    }

    /// Candidates for swapping into a slot
    pub fn swap_options(&self, slot: Slot, themed: bool) -> Vec<Track> {
        TrackFilters::swap_options(&self.slot_pool(themed), slot, self.state.playlist.get(slot))
    }

    pub fn slot_counts(&self) -> [usize; Slot::COUNT] {
        TrackFilters::slot_counts(&self.state.filtered_tracks())
    }

    /// Put a searched track into its slot if that slot is open
    pub fn add_to_playlist(&mut self, track: Track) -> Option<Slot> {
        if self.state.is_loading {
            return None;
        }
        let slot = self.state.playlist.first_open_slot_for(&track)?;
        self.dispatch(Action::SetTrack { slot, track });
        Some(slot)
    }

    pub fn export_text(&self) -> String {
        PlaylistExport::export_text(&self.state.playlist)
    }
}
