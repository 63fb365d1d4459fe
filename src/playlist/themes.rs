use super::ThemeCriteria;
use crate::catalog::Catalog;

/// Mood and occasion tags offered for themed playlists
pub const THEME_TAGS: [&str; 15] = [
    "Beast Mode",
    "Break-Up Songs",
    "Emo",
    "Halloween",
    "New Year's Eve",
    "P!nk",
    "Positive Vibes",
    "Pride",
    "Sing-Along",
    "Spicy",
    "Spring",
    "Summer",
    "Valentine's Day",
    "Winter",
    "Women of Pop",
];

/// Difficulty and length tags
pub const INSTRUCTOR_TAGS: [&str; 4] = ["Easy to Learn", "Hard", "Short (<4:30)", "Long (>6 min)"];

const TAG_EMOJIS: [(&str, &str); 16] = [
    ("Halloween", "🎃"),
    ("Women of Pop", "👩‍🎤"),
    ("Break-Up Songs", "💔"),
    ("Beast Mode", "💪"),
    ("Positive Vibes", "✨"),
    ("Sing-Along", "🎤"),
    ("Emo", "🎸"),
    ("P!nk", "💗"),
    ("New Year's Eve", "🥳"),
    ("Valentine's Day", "💘"),
    ("Summer", "☀️"),
    ("Spicy", "🌶️"),
    ("Hard", "💀"),
    ("Easy to Learn", "😅"),
    ("Short (<4:30)", "⏱️"),
    ("Long (>6 min)", "⌛"),
];

/// A one-click theme: a named bundle of tags and/or genres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePreset {
    pub key: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tags: &'static [&'static str],
    pub genres: &'static [&'static str],
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 17] = [
        preset("halloween", "Halloween", "🎃", &["Halloween"], &[]),
        preset("eighties", "80s", "🎸", &["80s"], &[]),
        preset("rock", "Rock", "🤘", &[], &["Rock"]),
        preset("womenOfPop", "Women of Pop", "👩‍🎤", &["Women of Pop"], &[]),
        preset("beastMode", "Beast Mode", "💪", &["Beast Mode"], &[]),
        preset("singAlong", "Sing-Along", "🎤", &["Sing-Along"], &[]),
        preset("breakUp", "Break-Up Songs", "💔", &["Break-Up Songs"], &[]),
        preset("positiveVibes", "Positive Vibes", "✨", &["Positive Vibes"], &[]),
        preset("valentines", "Valentine's Day", "💘", &["Valentine's Day"], &[]),
        preset("newYears", "New Year's Eve", "🥳", &["New Year's Eve"], &[]),
        preset("summer", "Summer", "☀️", &["Summer"], &[]),
        preset("emo", "Emo", "🎸", &["Emo"], &[]),
        preset("pink", "P!nk", "💗", &["P!nk"], &[]),
        preset("spicy", "Spicy", "🌶️", &["Spicy"], &[]),
        preset("spring", "Spring", "🌷", &["Spring"], &[]),
        preset("winter", "Winter", "❄️", &["Winter"], &[]),
        preset("pride", "Pride", "🌈", &["Pride"], &[]),
    ];

    /// Look up a preset by key, ignoring ASCII case
    pub fn find(key: &str) -> Option<ThemePreset> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key.eq_ignore_ascii_case(key.trim()))
    }

    /// Theme criteria selecting this preset's tags and genres
    pub fn criteria(&self) -> ThemeCriteria {
        ThemeCriteria {
            theme_tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            instructor_tags: Default::default(),
            genres: self.genres.iter().map(|genre| genre.to_string()).collect(),
        }
    }
}

const fn preset(
    key: &'static str,
    name: &'static str,
    emoji: &'static str,
    tags: &'static [&'static str],
    genres: &'static [&'static str],
) -> ThemePreset {
    ThemePreset {
        key,
        name,
        emoji,
        tags,
        genres,
    }
}

pub fn is_instructor_tag(tag: &str) -> bool {
    INSTRUCTOR_TAGS.iter().any(|known| *known == tag)
}

/// Human-facing name for a tag
pub fn tag_display_name(tag: &str) -> &str {
    if tag == "Hard" { "Hard Workout" } else { tag }
}

pub fn tag_emoji(tag: &str) -> &'static str {
    TAG_EMOJIS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, emoji)| *emoji)
        .unwrap_or("")
}

/// Theme tags present in the catalog, in menu order
pub fn available_theme_tags(catalog: &Catalog) -> Vec<&'static str> {
    present_in(catalog, &THEME_TAGS)
}

/// Instructor tags present in the catalog, in menu order
pub fn available_instructor_tags(catalog: &Catalog) -> Vec<&'static str> {
    present_in(catalog, &INSTRUCTOR_TAGS)
}

fn present_in(catalog: &Catalog, menu: &[&'static str]) -> Vec<&'static str> {
    let catalog_tags = catalog.tags();
    menu.iter()
        .copied()
        .filter(|tag| catalog_tags.iter().any(|present| present.as_str() == *tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;

    #[test]
    fn test_find_preset() {
        let rock = ThemePreset::find("ROCK").expect("rock preset");
        assert_eq!(rock.name, "Rock");
        let criteria = rock.criteria();
        assert!(criteria.theme_tags.is_empty());
        assert!(criteria.genres.contains("Rock"));

        let halloween = ThemePreset::find("halloween").expect("halloween preset");
        assert!(halloween.criteria().theme_tags.contains("Halloween"));

        assert!(ThemePreset::find("polka").is_none());
    }

    #[test]
    fn test_tag_display_helpers() {
        assert_eq!(tag_display_name("Hard"), "Hard Workout");
        assert_eq!(tag_display_name("Summer"), "Summer");
        assert_eq!(tag_emoji("Halloween"), "🎃");
        assert_eq!(tag_emoji("Unknown"), "");
        assert!(is_instructor_tag("Easy to Learn"));
        assert!(!is_instructor_tag("Summer"));
    }

    #[test]
    fn test_available_tags_follow_catalog() {
        let rows = vec![RawRow {
            track_no: Some("1 - Warmup".to_string()),
            song_title: Some("Spooky".to_string()),
            release: Some("100".to_string()),
            tags: Some("Summer, Halloween, Hard, Custom".to_string()),
            ..Default::default()
        }];
        let catalog = Catalog::from_rows(rows, "135");

        assert_eq!(available_theme_tags(&catalog), vec!["Halloween", "Summer"]);
        assert_eq!(available_instructor_tags(&catalog), vec!["Hard"]);
    }
}
