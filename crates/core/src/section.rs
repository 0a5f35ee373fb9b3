//! A rendered list section.
//!
//! A section starts out loading and is only ever replaced wholesale by a
//! successful fetch. A failed refresh leaves whatever was shown before.

/// One independently refreshed list on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    items: Option<Vec<T>>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> Section<T> {
    /// A section whose first fetch has not completed.
    #[must_use]
    pub const fn loading() -> Self {
        Self { items: None }
    }

    /// A section with known contents.
    #[must_use]
    pub const fn ready(items: Vec<T>) -> Self {
        Self { items: Some(items) }
    }

    /// Swap in freshly fetched contents.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = Some(items);
    }

    /// `None` while still loading.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.items.is_none()
    }

    /// Loaded and empty; views show their empty-state placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.as_ref().is_some_and(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_not_empty() {
        let section: Section<u8> = Section::loading();
        assert!(section.is_loading());
        assert!(!section.is_empty());
    }

    #[test]
    fn test_replace_swaps_whole_contents() {
        let mut section = Section::ready(vec![1, 2, 3]);
        section.replace(vec![]);
        assert!(section.is_empty());
        assert_eq!(section.items(), Some(&[][..]));
    }
}
