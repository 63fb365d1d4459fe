use anyhow::{Context, Result, anyhow};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod catalog;
mod client;
mod config;
mod models;
mod playlist;


use crate::client::CatalogClient;
use crate::config::load_config;
use crate::models::{Slot, Track};
use crate::playlist::state::{Action, Session, SessionState};
use crate::playlist::themes::{
    ThemePreset, available_instructor_tags, available_theme_tags, is_instructor_tag, tag_display_name,
    tag_emoji, THEME_TAGS,
};
use crate::playlist::utils::PlaylistExport;
use crate::playlist::{IndexSource, Playlist, ReleaseOptions, RngSource, SavedFilters, ThemeCriteria};

#[derive(Parser)]
#[command(name = "pump-playlist")]
#[command(about = "Build 10-slot Pump class playlists from the track catalog")]
#[command(version)]
struct Args {
    /// Catalog CSV path or http(s) URL (overrides PUMP_CATALOG_SOURCE)
    #[arg(long = "catalog", global = true)]
    catalog: Option<String>,

    /// Saved filters JSON file (release range and theme selection)
    #[arg(short = 'f', long = "filters", global = true)]
    filters_file: Option<String>,

    /// Seed for reproducible random picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(flatten)]
    release: ReleaseArgs,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Default)]
struct ReleaseArgs {
    /// Only use tracks from this release onward
    #[arg(long, global = true)]
    earliest_release: Option<String>,

    /// Leave out the newest release
    #[arg(long, global = true)]
    exclude_newest: bool,

    /// Only use the 10 most recent releases
    #[arg(long = "only-recent-10", global = true)]
    only_recent_10: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List releases and per-slot track counts
    Releases,
    /// List genres in the catalog
    Genres,
    /// List theme, instructor and other tags in the catalog
    Tags,
    /// List theme presets
    Presets,
    /// Search titles and artists
    Search {
        #[arg(required = true)]
        term: Vec<String>,
    },
    /// Generate a playlist
    Generate {
        /// Only use tracks matching the theme selection
        #[arg(long)]
        themed: bool,

        /// Theme preset key (see `presets`)
        #[arg(long)]
        preset: Option<String>,

        #[arg(long = "theme-tag")]
        theme_tags: Vec<String>,

        #[arg(long = "instructor-tag")]
        instructor_tags: Vec<String>,

        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Write the export text to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Print the playlist as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Layer command-line release flags over the saved ones
fn merge_release_options(saved: &ReleaseOptions, cli: &ReleaseArgs) -> ReleaseOptions {
    ReleaseOptions {
        earliest_release: cli
            .earliest_release
            .clone()
            .or_else(|| saved.earliest_release.clone()),
        exclude_newest: saved.exclude_newest || cli.exclude_newest,
        only_recent_10: saved.only_recent_10 || cli.only_recent_10,
    }
}

fn format_track(track: &Track) -> String {
    format!(
        "{} - {}: {} — {} ({})",
        track.release,
        track.slot.label(),
        track.song_title,
        track.artist,
        track.duration
    )
}

fn playlist_listing(playlist: &Playlist) -> String {
    let mut listing = String::from("\n=== PLAYLIST ===\n");
    for (slot, track) in playlist.iter() {
        let line = match track {
            Some(track) => {
                let tags = track
                    .tag_list()
                    .iter()
                    .map(|tag| format!("{}{}", tag_emoji(tag), tag_display_name(tag)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{:>2}. {:<10} \"{}\" by {} [{}] ({}){}",
                    slot.ordinal(),
                    slot.body_part(),
                    track.song_title,
                    track.artist,
                    track.release,
                    track.duration,
                    if tags.is_empty() { String::new() } else { format!(" | {tags}") }
                )
            }
            None => format!("{:>2}. {:<10} [Empty]", slot.ordinal(), slot.body_part()),
        };
        listing.push_str(&line);
        listing.push('\n');
    }
    listing.push_str(&format!("Total Time: {}\n", playlist.total_duration()));
    listing
}

/// Stdout for `generate`. With `json` set the output is only the JSON document.
fn generate_report(playlist: &Playlist, json: bool, export_to_file: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(playlist)?));
    }

    let mut report = playlist_listing(playlist);
    if !export_to_file {
        if playlist.has_any_occupied() {
            report.push('\n');
            report.push_str(&PlaylistExport::export_text(playlist));
        } else {
            report.push_str("\nNo tracks selected.\n");
        }
    }
    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    // Load configuration from .env
    let config = load_config();
    let source = args
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_source.clone());

    let saved = match &args.filters_file {
        Some(path) => SavedFilters::load_from_file(path)?,
        None => SavedFilters::default(),
    };

    let client = CatalogClient::new(source);
    let catalog = client.load_catalog(&config.default_latest_release);
    if catalog.is_empty() {
        warn!(source = client.source(), "Catalog is empty; nothing to choose from");
    }

    let random: Box<dyn IndexSource> = match args.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_entropy()),
    };
    let mut session = Session::new(
        SessionState::new(&config.default_earliest_release, &config.default_latest_release),
        random,
    );
    session.dispatch(Action::CatalogLoaded(catalog));

    let release = merge_release_options(&saved.release, &args.release);
    if release.earliest_release.is_some() {
        session.dispatch(Action::SetEarliestRelease(release.earliest_release));
    }
    session.dispatch(Action::SetExcludeNewest(release.exclude_newest));
    session.dispatch(Action::SetOnlyRecent10(release.only_recent_10));
    info!(release = ?session.state().release, "Release filters applied");

    match args.command {
        Command::Releases => {
            let catalog = &session.state().catalog;
            println!("Releases ({}):", catalog.all_release_ids().len());
            for release in catalog.all_release_ids() {
                let marker = if release == catalog.latest_release_id() {
                    " (latest)"
                } else {
                    ""
                };
                println!(
                    "  {release:>8}  {} tracks{marker}",
                    catalog.release_track_count(release)
                );
            }

            println!("\nTracks available per slot with current filters:");
            for (slot, count) in Slot::ALL.iter().zip(session.slot_counts()) {
                println!("  {:<16} {count}", slot.label());
            }
        }

        Command::Genres => {
            for genre in session.state().catalog.genres() {
                println!("{genre}");
            }
        }

        Command::Tags => {
            let catalog = &session.state().catalog;
            println!("Theme tags:");
            for tag in available_theme_tags(catalog) {
                println!("  {} {}", tag_emoji(tag), tag_display_name(tag));
            }
            println!("Instructor tags:");
            for tag in available_instructor_tags(catalog) {
                println!("  {} {}", tag_emoji(tag), tag_display_name(tag));
            }
            let other: Vec<String> = catalog
                .tags()
                .into_iter()
                .filter(|tag| {
                    !THEME_TAGS.iter().any(|known| *known == tag.as_str()) && !is_instructor_tag(tag)
                })
                .collect();
            if !other.is_empty() {
                println!("Other tags:");
                for tag in other {
                    println!("  {tag}");
                }
            }
        }

        Command::Presets => {
            for preset in ThemePreset::ALL {
                let selection: Vec<&str> =
                    preset.tags.iter().chain(preset.genres.iter()).copied().collect();
                println!(
                    "{:<14} {} {} ({})",
                    preset.key,
                    preset.emoji,
                    preset.name,
                    selection.join(", ")
                );
            }
        }

        Command::Search { term } => {
            let term = term.join(" ");
            let results = session.search(&term);
            println!("{} track(s) found for \"{term}\"", results.len());
            for track in &results {
                let key = track.key();
                println!("  {}  {}", &key[..8], format_track(track));
            }
        }

        Command::Generate {
            themed,
            preset,
            theme_tags,
            instructor_tags,
            genres,
            output,
            json,
        } => {
            let mut theme = saved.theme.clone();
            if let Some(key) = &preset {
                let preset = ThemePreset::find(key)
                    .ok_or_else(|| anyhow!("Unknown theme preset '{key}'"))?;
                theme.merge(&preset.criteria());
            }
            theme.merge(&ThemeCriteria {
                theme_tags: theme_tags.into_iter().collect(),
                instructor_tags: instructor_tags.into_iter().collect(),
                genres: genres.into_iter().collect(),
            });

            let themed = themed || !theme.is_empty();
            session.dispatch(Action::SetThemeFilters {
                theme_tags: Some(theme.theme_tags),
                instructor_tags: Some(theme.instructor_tags),
                genres: Some(theme.genres),
            });

            if themed {
                session.generate_themed();
            } else {
                session.generate_random();
            }

            let playlist = session.playlist();
            if !playlist.is_complete() {
                let empty: Vec<String> = playlist.empty_slots().iter().map(|s| s.label()).collect();
                warn!(empty = ?empty, "No eligible track for some slots");
            }

            print!("{}", generate_report(playlist, json, output.is_some())?);

            if let Some(path) = output {
                let mut file = std::fs::File::create(&path)
                    .with_context(|| format!("Failed to create '{path}'"))?;
                if !PlaylistExport::write_to(playlist, &mut file) {
                    return Err(anyhow!("Failed to write playlist export to '{path}'"));
                }
                info!(path = %path, "Playlist export written");
            }
        }
    }

    Ok(())
}
