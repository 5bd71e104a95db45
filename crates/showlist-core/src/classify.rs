use regex::Regex;

use crate::error::Result;

/// Whole-word, case-insensitive episode markers.
pub const EPISODE_PATTERN: &str =
    r"(?i)\b(Season|Episode|Limited Series|S\d+\s*E\d+|E\d+|Ep\.?\s*\d+|Part|Chapter)\b";

/// Decides whether a normalized title names an episode and, if so, which
/// series it belongs to.
///
/// The compiled pattern is owned by the classifier, so one instance is built
/// per run and handed to whatever scans the rows.
#[derive(Debug, Clone)]
pub struct EpisodeClassifier {
    re_marker: Regex,
}

impl EpisodeClassifier {
    /// Constructs a classifier with the pre-compiled episode pattern.
    ///
    /// # Errors
    ///
    /// Returns `ShowlistError::RegexError` if the pattern fails to compile
    /// (should never happen with the static pattern defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_marker: Regex::new(EPISODE_PATTERN)?,
        })
    }

    /// Returns `true` if the title carries any season/episode marker.
    pub fn is_episodic(&self, title: &str) -> bool {
        self.re_marker.is_match(title)
    }

    /// Returns the series base name for episodic titles, `None` otherwise.
    ///
    /// # Examples
    /// ```
    /// use showlist_core::classify::EpisodeClassifier;
    ///
    /// let classifier = EpisodeClassifier::new().unwrap();
    /// assert_eq!(classifier.series_name("The Wire: Season 1"), Some("The Wire"));
    /// assert_eq!(classifier.series_name("Inception"), None);
    /// ```
    pub fn series_name<'a>(&self, title: &'a str) -> Option<&'a str> {
        self.is_episodic(title).then(|| base_name(title))
    }
}

/// Text before the first colon, trimmed. The whole title when there is no colon.
pub fn base_name(title: &str) -> &str {
    title.split(':').next().unwrap_or(title).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> EpisodeClassifier {
        EpisodeClassifier::new().unwrap()
    }

    #[test]
    fn word_markers_match() {
        let c = classifier();
        for title in [
            "The Wire: Season 1",
            "Lost: Episode 4",
            "Chernobyl: Limited Series",
            "Dune: Part Two",
            "Stranger Things: Chapter One: The Vanishing of Will Byers",
        ] {
            assert!(c.is_episodic(title), "should be episodic: {title}");
        }
    }

    #[test]
    fn code_markers_match() {
        let c = classifier();
        for title in [
            "Breaking Bad: S01E01",
            "Breaking Bad S1 E2",
            "Show E12",
            "Show Ep. 3",
            "Show Ep 3",
            "Show ep7",
        ] {
            assert!(c.is_episodic(title), "should be episodic: {title}");
        }
    }

    #[test]
    fn markers_inside_words_do_not_match() {
        let c = classifier();
        for title in [
            "Seasoning Guide",
            "Offseason",
            "Departed",
            "Epic Movie",
            "Chapters",
            "E.T. the Extra-Terrestrial",
            "S01",
        ] {
            assert!(!c.is_episodic(title), "should not be episodic: {title}");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classifier();
        for title in ["Show: season 1", "Show: SEASON 1", "Show: Season 1"] {
            assert_eq!(c.series_name(title), Some("Show"));
        }
        assert!(c.is_episodic("show s02e10"));
    }

    #[test]
    fn base_name_stops_at_first_colon() {
        assert_eq!(base_name("Sherlock: Season 2: The Hounds"), "Sherlock");
        assert_eq!(base_name("Twin Peaks  :Part 8"), "Twin Peaks");
        assert_eq!(base_name("Limited Series Special"), "Limited Series Special");
    }

    #[test]
    fn empty_base_name_is_kept() {
        let c = classifier();
        assert_eq!(c.series_name(": Season 1"), Some(""));
    }
}
