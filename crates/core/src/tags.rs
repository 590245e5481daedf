//! Product tags
//!
//! Free-form tag strings used for menu filtering, kept sorted and
//! deduplicated so lookups can binary search.

use smallvec::SmallVec;

/// A sorted, deduplicated set of free-form tag strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: SmallVec<[String; 4]>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::from_strings(tags.iter().map(ToString::to_string))
    }

    /// Creates a tag set from owned strings.
    pub fn from_strings(tags: impl IntoIterator<Item = String>) -> Self {
        let mut tags: SmallVec<[String; 4]> = tags.into_iter().collect();

        tags.sort();
        tags.dedup();

        Self { tags }
    }

    /// Checks whether the set contains a specific tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    /// Adds a tag, keeping the set sorted; duplicates are ignored.
    pub fn add(&mut self, tag: &str) {
        if let Err(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Iterates over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Checks whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
