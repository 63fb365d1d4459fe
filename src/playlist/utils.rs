use std::io::Write;

use tracing::error;

use crate::models::Slot;
use crate::playlist::Playlist;

/// Convert an "M:SS" duration to seconds. Unknown or malformed durations count as zero.
pub fn duration_to_seconds(duration: &str) -> u32 {
    let duration = duration.trim();
    if duration.is_empty() || duration == "-" {
        return 0;
    }

    let Some((minutes, seconds)) = duration.split_once(':') else {
        return 0;
    };
    match (minutes.trim().parse::<u32>(), seconds.trim().parse::<u32>()) {
        (Ok(minutes), Ok(seconds)) => minutes.saturating_mul(60).saturating_add(seconds),
        _ => 0,
    }
}

/// Render seconds as "M:SS"
pub fn seconds_to_duration(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Copy/paste rendering of a playlist
pub struct PlaylistExport;

impl PlaylistExport {
    /// Export text for a playlist, or an empty string when nothing is selected
    pub fn export_text(playlist: &Playlist) -> String {
        if !playlist.has_any_occupied() {
            return String::new();
        }

        let mut text = format!("Pump Playlist - Total Time: {}\n", playlist.total_duration());
        for slot in Slot::ALL {
            match playlist.get(slot) {
                Some(track) => text.push_str(&format!(
                    "{} - {}: {} — {} ({})\n",
                    track.release,
                    slot.label(),
                    track.song_title,
                    track.artist,
                    track.duration
                )),
                None => text.push_str(&format!("{}: [Empty]\n", slot.label())),
            }
        }
        text
    }

    /// Write the export text to a sink. Returns false if the write fails.
    pub fn write_to<W: Write>(playlist: &Playlist, writer: &mut W) -> bool {
        let text = Self::export_text(playlist);
        match writer.write_all(text.as_bytes()).and_then(|_| writer.flush()) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to write playlist export");
                false
            }
        }
    }
}
