use std::collections::BTreeSet;

/// Sorted, duplicate-free set of contig names taken from one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContigSet {
    names: BTreeSet<String>,
}

impl ContigSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names of this set that are absent from `other`, in sorted order
    #[must_use]
    pub fn missing_from(&self, other: &ContigSet) -> Vec<&str> {
        self.iter().filter(|name| !other.contains(name)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ContigSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
