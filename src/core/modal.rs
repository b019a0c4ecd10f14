use crate::core::content::{CharacterProfile, ContentRegistry, SectionEssay};

pub const CHARACTER_MODAL: &str = "characterModal";
pub const SECTION_MODAL: &str = "sectionModal";

/// Content built on demand for the shared character/section modals.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Character(CharacterProfile),
    Section(SectionEssay),
}

/// Keeps at most one modal open and tracks the background scroll lock.
#[derive(Debug, Clone)]
pub struct ModalPresenter {
    known: Vec<String>,
    open: Option<String>,
    content: Option<ModalContent>,
}

impl ModalPresenter {
    /// `article_ids` are the static modals rendered with the page.
    pub fn new<I, S>(article_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known: Vec<String> = article_ids.into_iter().map(Into::into).collect();
        known.push(CHARACTER_MODAL.to_string());
        known.push(SECTION_MODAL.to_string());
        Self {
            known,
            open: None,
            content: None,
        }
    }

    pub fn for_registry(registry: &ContentRegistry) -> Self {
        Self::new(registry.hero_slides.iter().map(|s| s.modal.clone()))
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Background scrolling is suspended while any modal is visible.
    pub fn scroll_locked(&self) -> bool {
        self.open.is_some()
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Closes everything, then shows `id` if such a modal exists.
    pub fn open(&mut self, id: &str) -> bool {
        self.close_all();
        if !self.known.iter().any(|k| k == id) {
            log::warn!("no modal with id '{}'", id);
            return false;
        }
        log::debug!("opening modal {}", id);
        self.open = Some(id.to_string());
        true
    }

    pub fn open_character(&mut self, key: &str, registry: &ContentRegistry) -> bool {
        let Some(profile) = registry.character(key) else {
            log::warn!("unknown character '{}'", key);
            return false;
        };
        self.content = Some(ModalContent::Character(profile.clone()));
        self.open(CHARACTER_MODAL)
    }

    pub fn open_section(&mut self, key: &str, registry: &ContentRegistry) -> bool {
        let Some(essay) = registry.section(key) else {
            log::warn!("unknown section '{}'", key);
            return false;
        };
        self.content = Some(ModalContent::Section(essay.clone()));
        self.open(SECTION_MODAL)
    }

    /// Content is kept so a closing animation can still show it.
    pub fn close_all(&mut self) {
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_opening_one_modal_closes_the_other() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let mut modals = ModalPresenter::for_registry(&registry);

        assert!(modals.open("novelModal"));
        assert!(modals.open_character("pi", &registry));
        assert!(modals.is_open(CHARACTER_MODAL));
        assert!(!modals.is_open("novelModal"));
        assert!(modals.scroll_locked());
        Ok(())
    }

    #[test]
    fn test_unknown_character_opens_nothing() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let mut modals = ModalPresenter::for_registry(&registry);

        assert!(!modals.open_character("mr-kumar", &registry));
        assert_eq!(modals.open_id(), None);
        assert!(modals.content().is_none());
        assert!(!modals.scroll_locked());

        // a miss leaves an already open modal untouched
        modals.open_section("booker-intro", &registry);
        assert!(!modals.open_character("mr-kumar", &registry));
        assert!(modals.is_open(SECTION_MODAL));
        assert!(matches!(modals.content(), Some(ModalContent::Section(s)) if s.key == "booker-intro"));
        Ok(())
    }

    #[test]
    fn test_unknown_static_id_closes_all() {
        let mut modals = ModalPresenter::new(["novelModal"]);
        modals.open("novelModal");
        assert!(!modals.open("missingModal"));
        assert_eq!(modals.open_id(), None);
    }

    #[test]
    fn test_close_all_restores_scroll() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let mut modals = ModalPresenter::for_registry(&registry);
        modals.open_character("richard", &registry);
        modals.close_all();
        assert!(!modals.scroll_locked());
        assert_eq!(modals.open_id(), None);
        Ok(())
    }
}
