use crate::error::Result;
use crate::types::{ColorJson, RepoDto};
use std::collections::HashMap;

const BUNDLED_COLORS: &str = include_str!("../resources/colors.json");

/// Language name to display color, keyed by the exact name GitHub reports.
#[derive(Debug, Clone, Default)]
pub struct LanguageColors {
    entries: HashMap<String, ColorJson>,
}

impl LanguageColors {
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_COLORS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, ColorJson> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn color_for(&self, language: &str) -> Option<&str> {
        self.entries.get(language)?.color.as_deref()
    }

    /// Attach the color for the repository's language, leaving unknown languages uncolored.
    pub fn annotate(&self, repo: &mut RepoDto) {
        if let Some(color) = repo.language.as_deref().and_then(|l| self.color_for(l)) {
            repo.color_language_rgb = Some(color.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
