#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::catalog::release_sort_key;
    use crate::models::{Slot, Track};
    use std::collections::HashSet;

    fn create_mock_track(slot: Slot, title: &str, release: &str) -> Track {
        Track {
            slot,
            song_title: title.to_string(),
            artist: "Test Artist".to_string(),
            release: release.to_string(),
            genre: "Pop".to_string(),
            duration: "4:00".to_string(),
            tags: None,
            sort_key: release_sort_key(release),
        }
    }

    /// A source that always picks the first eligible track
    fn first_choice_source() -> MockIndexSource {
        let mut source = MockIndexSource::new();
        source.expect_next_index().returning(|_| 0);
        source
    }

    /// Three distinct titles per slot
    fn create_full_catalog() -> Vec<Track> {
        Slot::ALL
            .iter()
            .flat_map(|slot| {
                (1..=3).map(move |n| {
                    create_mock_track(*slot, &format!("{} Song {n}", slot.body_part()), "100")
                })
            })
            .collect()
    }

    fn assert_unique_titles(playlist: &Playlist) {
        let titles: Vec<_> = playlist.occupied_titles();
        let unique: HashSet<_> = titles.iter().collect();
        assert_eq!(titles.len(), unique.len(), "duplicate title in {titles:?}");
    }

    #[test]
    fn test_single_track_scenario() {
        let tracks = vec![create_mock_track(Slot::Warmup, "Solo", "100")];
        let mut generator = PlaylistGenerator::new(RngSource::seeded(7));

        for _ in 0..20 {
            let picked = generator.pick_random(&tracks, Slot::Warmup, &[]);
            assert_eq!(picked.map(|t| t.song_title.as_str()), Some("Solo"));
        }
        let excluded = vec!["Solo".to_string()];
        for _ in 0..20 {
            assert!(generator.pick_random(&tracks, Slot::Warmup, &excluded).is_none());
        }
    }

    #[test]
    fn test_pick_random_only_considers_slot() {
        let tracks = vec![
            create_mock_track(Slot::Chest, "Push", "100"),
            create_mock_track(Slot::Back, "Pull", "100"),
        ];
        let mut generator = PlaylistGenerator::new(first_choice_source());

        let picked = generator.pick_random(&tracks, Slot::Back, &[]);
        assert_eq!(picked.map(|t| t.song_title.as_str()), Some("Pull"));
        assert!(generator.pick_random(&tracks, Slot::Core, &[]).is_none());
    }

    #[test]
    fn test_pick_random_uses_source_index_over_eligible_tracks() {
        let tracks = vec![
            create_mock_track(Slot::Core, "A", "100"),
            create_mock_track(Slot::Squats, "Other", "100"),
            create_mock_track(Slot::Core, "B", "100"),
            create_mock_track(Slot::Core, "C", "100"),
        ];
        let mut source = MockIndexSource::new();
        source
            .expect_next_index()
            .withf(|bound| *bound == 2)
            .times(1)
            .returning(|_| 1);
        let mut generator = PlaylistGenerator::new(source);

        let excluded = vec!["A".to_string()];
        let picked = generator.pick_random(&tracks, Slot::Core, &excluded);
        assert_eq!(picked.map(|t| t.song_title.as_str()), Some("C"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_source_index_is_caught() {
        let tracks = vec![create_mock_track(Slot::Core, "A", "100")];
        let mut source = MockIndexSource::new();
        source.expect_next_index().returning(|bound| bound);
        let mut generator = PlaylistGenerator::new(source);

        generator.pick_random(&tracks, Slot::Core, &[]);
    }

    #[test]
    fn test_source_is_not_called_without_candidates() {
        let mut source = MockIndexSource::new();
        source.expect_next_index().never();
        let mut generator = PlaylistGenerator::new(source);

        assert!(generator.pick_random(&[], Slot::Warmup, &[]).is_none());
    }

    #[test]
    fn test_every_eligible_track_can_be_drawn() {
        let tracks: Vec<Track> = (0..5)
            .map(|n| create_mock_track(Slot::Biceps, &format!("Curl {n}"), "100"))
            .collect();
        let mut generator = PlaylistGenerator::new(RngSource::seeded(42));

        let mut seen = HashSet::new();
        for _ in 0..500 {
            if let Some(track) = generator.pick_random(&tracks, Slot::Biceps, &[]) {
                seen.insert(track.song_title.clone());
            }
        }
        assert_eq!(seen.len(), tracks.len());
    }

    #[test]
    fn test_generate_fills_every_slot_in_order() {
        let tracks = create_full_catalog();
        let mut generator = PlaylistGenerator::new(first_choice_source());

        let playlist = generator.generate_playlist(&tracks);
        assert!(playlist.is_complete());
        for (slot, track) in playlist.iter() {
            let track = track.expect("slot filled");
            assert_eq!(track.slot, slot);
            assert_eq!(track.song_title, format!("{} Song 1", slot.body_part()));
        }
    }

    #[test]
    fn test_generate_never_repeats_a_title() {
        // The same title is offered for every slot, under different releases
        let mut tracks: Vec<Track> = Slot::ALL
            .iter()
            .map(|slot| create_mock_track(*slot, "Everywhere", &format!("{}", 100 + slot.index())))
            .collect();
        tracks.push(create_mock_track(Slot::Squats, "Squat Only", "100"));

        let mut generator = PlaylistGenerator::new(first_choice_source());
        let playlist = generator.generate_playlist(&tracks);

        assert_unique_titles(&playlist);
        assert_eq!(
            playlist.get(Slot::Warmup).map(|t| t.song_title.as_str()),
            Some("Everywhere")
        );
        assert_eq!(
            playlist.get(Slot::Squats).map(|t| t.song_title.as_str()),
            Some("Squat Only")
        );
        assert_eq!(playlist.empty_slots().len(), Slot::COUNT - 2);
    }

    #[test]
    fn test_generate_random_draws_stay_unique() {
        let mut tracks = create_full_catalog();
        // Shared titles across slots make collisions likely
        for slot in Slot::ALL {
            tracks.push(create_mock_track(slot, "Shared Anthem", "101"));
            tracks.push(create_mock_track(slot, "Shared Ballad", "102"));
        }

        let mut generator = PlaylistGenerator::new(RngSource::seeded(2024));
        for _ in 0..50 {
            let playlist = generator.generate_playlist(&tracks);
            assert!(playlist.is_complete());
            assert_unique_titles(&playlist);
        }
    }

    #[test]
    fn test_greedy_fill_can_leave_later_slot_empty() {
        // Warmup takes "Both" first, leaving Squats with nothing
        let tracks = vec![
            create_mock_track(Slot::Warmup, "Both", "100"),
            create_mock_track(Slot::Warmup, "Warmup Only", "100"),
            create_mock_track(Slot::Squats, "Both", "101"),
        ];
        let mut generator = PlaylistGenerator::new(first_choice_source());

        let playlist = generator.generate_playlist(&tracks);
        assert_eq!(
            playlist.get(Slot::Warmup).map(|t| t.song_title.as_str()),
            Some("Both")
        );
        assert!(playlist.get(Slot::Squats).is_none());
    }

    #[test]
    fn test_generate_from_empty_pool() {
        let mut source = MockIndexSource::new();
        source.expect_next_index().never();
        let mut generator = PlaylistGenerator::new(source);

        let playlist = generator.generate_playlist(&[]);
        assert!(!playlist.has_any_occupied());
    }

    #[test]
    fn test_randomize_slot_excludes_every_selected_title() {
        let tracks = vec![
            create_mock_track(Slot::Chest, "Current", "100"),
            create_mock_track(Slot::Chest, "Taken Elsewhere", "100"),
            create_mock_track(Slot::Chest, "Fresh A", "100"),
            create_mock_track(Slot::Chest, "Fresh B", "100"),
        ];
        let mut playlist = Playlist::new();
        playlist.set_slot(Slot::Chest, tracks[0].clone());
        playlist.set_slot(Slot::Warmup, create_mock_track(Slot::Warmup, "Taken Elsewhere", "99"));

        let mut generator = PlaylistGenerator::new(RngSource::seeded(3));
        for _ in 0..50 {
            let replacement = generator
                .randomize_slot(&tracks, &playlist, Slot::Chest)
                .expect("alternatives exist");
            assert!(replacement.song_title.starts_with("Fresh"));
        }
    }

    #[test]
    fn test_randomize_slot_without_alternative() {
        let tracks = vec![create_mock_track(Slot::Core, "Only", "100")];
        let mut playlist = Playlist::new();
        playlist.set_slot(Slot::Core, tracks[0].clone());

        let mut generator = PlaylistGenerator::new(first_choice_source());
        assert!(generator.randomize_slot(&tracks, &playlist, Slot::Core).is_none());
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn IndexSource> = Box::new(RngSource::seeded(1));
        let mut generator = PlaylistGenerator::new(source);
        let tracks = vec![create_mock_track(Slot::Lunges, "Step", "100")];
        assert!(generator.pick_random(&tracks, Slot::Lunges, &[]).is_some());
    }
}
