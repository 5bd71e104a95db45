use std::collections::HashSet;
use std::io::{self, Write};

/// Unique series base names, compared by exact string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSet {
    names: HashSet<String>,
}

impl SeriesSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name; returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Whether `name` is present, by exact string match.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no name has been inserted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the set into names sorted case-insensitively, ties broken by
    /// plain string order so the result is deterministic.
    #[must_use]
    pub fn into_sorted(self) -> Vec<String> {
        let mut names: Vec<String> = self.names.into_iter().collect();
        names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
        names
    }

    /// Writes the sorted names, one per line.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    pub fn write_to<W: Write>(self, mut writer: W) -> io::Result<()> {
        for name in self.into_sorted() {
            writeln!(writer, "{name}")?;
        }
        writer.flush()
    }
}

impl<S: Into<String>> FromIterator<S> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let mut set = SeriesSet::new();
        assert!(set.insert("The Wire"));
        assert!(!set.insert("The Wire"));
        assert!(set.insert("the wire"));
        assert_eq!(set.len(), 2);
        assert!(set.contains("The Wire"));
    }

    #[test]
    fn sorted_case_insensitively() {
        let set: SeriesSet = ["breaking Bad", "The Wire", "Arrested Development", "lost"]
            .into_iter()
            .collect();
        assert_eq!(
            set.into_sorted(),
            vec!["Arrested Development", "breaking Bad", "lost", "The Wire"]
        );
    }

    #[test]
    fn case_ties_are_deterministic() {
        let set: SeriesSet = ["lost", "LOST", "Lost"].into_iter().collect();
        assert_eq!(set.into_sorted(), vec!["LOST", "Lost", "lost"]);
    }

    #[test]
    fn write_to_emits_one_name_per_line() {
        let set: SeriesSet = ["Lost", "", "Dark"].into_iter().collect();
        let mut out = Vec::new();
        set.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nDark\nLost\n");
    }

    #[test]
    fn empty_set_writes_nothing() {
        let mut out = Vec::new();
        SeriesSet::new().write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
