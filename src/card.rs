use crate::models::{Hero, PowerStats};
use crate::utils::capitalize_words;
use reqwest::Url;

/// Where the portrait for a card comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    Placeholder,
}

impl ImageSource {
    /// Absolute URLs load remotely; anything else falls back to the placeholder.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => ImageSource::Remote(url),
            Err(_) => ImageSource::Placeholder,
        }
    }
}

/// The labels and portrait shown for one hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroCard {
    pub name: String,
    pub description: String,
    pub place_of_birth: String,
    pub alignment: String,
    pub stats: PowerStats,
    pub image: ImageSource,
}

impl HeroCard {
    pub fn stat_labels(&self) -> Vec<String> {
        self.stats
            .entries()
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }

    /// Plain-text rendering, one label per line.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.name.clone(),
            self.description.clone(),
            self.place_of_birth.clone(),
            self.alignment.clone(),
        ];
        lines.extend(self.stat_labels());
        lines
    }
}

impl From<&Hero> for HeroCard {
    fn from(hero: &Hero) -> Self {
        let bio = &hero.biography;
        let description = if bio.full_name.is_empty() {
            "Unknown Hero".to_string()
        } else {
            bio.full_name.clone()
        };
        let birthplace = if bio.place_of_birth.is_empty() {
            "Unknown"
        } else {
            bio.place_of_birth.as_str()
        };
        Self {
            name: hero.name.clone(),
            description,
            place_of_birth: format!("Place of Birth: {birthplace}"),
            alignment: format!("Alignment: {}", capitalize_words(&bio.alignment)),
            stats: hero.powerstats,
            image: ImageSource::parse(&hero.images.sm),
        }
    }
}
