use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const HERO_JSON: &str = include_str!("../../assets/hero.json");
const CHARACTERS_JSON: &str = include_str!("../../assets/characters.json");
const SECTIONS_JSON: &str = include_str!("../../assets/sections.json");
const QUIZ_JSON: &str = include_str!("../../assets/quiz.json");

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    /// Id of the article modal opened by this slide's "read more" button.
    pub modal: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CharacterProfile {
    pub key: String,
    pub category: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub symbolism: String,
    pub analysis: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SectionEssay {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    /// Trusted HTML body, shipped with the crate.
    pub content: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
}

/// Read-only dictionaries backing the quiz, the carousels and the modals.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    pub hero_slides: Vec<HeroSlide>,
    pub characters: Vec<CharacterProfile>,
    pub sections: Vec<SectionEssay>,
    pub quiz: Vec<QuizQuestion>,
}

impl ContentRegistry {
    /// Parses the dictionaries embedded at build time.
    pub fn builtin() -> Result<Self> {
        Self::from_json(HERO_JSON, CHARACTERS_JSON, SECTIONS_JSON, QUIZ_JSON)
    }

    pub fn from_json(hero: &str, characters: &str, sections: &str, quiz: &str) -> Result<Self> {
        let registry = Self {
            hero_slides: serde_json::from_str(hero).context("Failed to parse hero slides")?,
            characters: serde_json::from_str(characters)
                .context("Failed to parse character profiles")?,
            sections: serde_json::from_str(sections).context("Failed to parse section essays")?,
            quiz: serde_json::from_str(quiz).context("Failed to parse quiz questions")?,
        };
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<()> {
        if self.quiz.is_empty() {
            anyhow::bail!("Quiz has no questions");
        }
        for (i, q) in self.quiz.iter().enumerate() {
            if q.options.len() != OPTIONS_PER_QUESTION {
                anyhow::bail!(
                    "Question {} has {} options, expected {}",
                    i + 1,
                    q.options.len(),
                    OPTIONS_PER_QUESTION
                );
            }
            if q.correct >= q.options.len() {
                anyhow::bail!("Question {} marks option {} as correct", i + 1, q.correct);
            }
        }

        let mut keys = HashSet::new();
        for c in &self.characters {
            if c.category.is_empty() || c.category == crate::core::roster::ALL_CATEGORY {
                anyhow::bail!("Character '{}' has invalid category '{}'", c.key, c.category);
            }
            if !keys.insert(c.key.as_str()) {
                anyhow::bail!("Duplicate character key '{}'", c.key);
            }
        }

        let mut keys = HashSet::new();
        for s in &self.sections {
            if !keys.insert(s.key.as_str()) {
                anyhow::bail!("Duplicate section key '{}'", s.key);
            }
        }

        let mut modals = HashSet::new();
        for slide in &self.hero_slides {
            if !modals.insert(slide.modal.as_str()) {
                anyhow::bail!("Duplicate hero modal id '{}'", slide.modal);
            }
        }
        Ok(())
    }

    pub fn character(&self, key: &str) -> Option<&CharacterProfile> {
        self.characters.iter().find(|c| c.key == key)
    }

    pub fn section(&self, key: &str) -> Option<&SectionEssay> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn hero_slide_by_modal(&self, modal: &str) -> Option<&HeroSlide> {
        self.hero_slides.iter().find(|s| s.modal == modal)
    }

    /// Distinct character categories in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for c in &self.characters {
            if !seen.contains(&c.category) {
                seen.push(c.category.clone());
            }
        }
        seen
    }
}
