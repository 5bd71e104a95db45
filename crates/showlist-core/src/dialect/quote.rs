//! Quoted-field pass of the dialect sniffer.
//!
//! Looks for quoted fields sitting next to a delimiter and infers the quote
//! character, the delimiter, whether delimiters are followed by a space, and
//! whether quotes are escaped by doubling.

use regex::Regex;

use crate::error::Result;

/// Quote characters the sniffer recognizes.
const QUOTE_CHARS: [char; 2] = ['"', '\''];

/// Any character that may act as a delimiter around a quoted field.
const DELIM_CLASS: &str = r#"[^\w\n"']"#;

/// What the quoted-field pass inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteGuess {
    /// Most frequent quote character.
    pub quote: char,
    /// Most frequent candidate delimiter next to a quoted field, if any.
    pub delimiter: Option<char>,
    /// Every counted delimiter was followed by a single space.
    pub skip_initial_space: bool,
    /// Quotes inside quoted fields are escaped by doubling.
    pub double_quote: bool,
}

/// Where a quoted field sits relative to its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `,"…",`
    Enclosed,
    /// `"…",` at the start of a line
    Leading,
    /// `,"…"` at the end of a line
    Trailing,
    /// `"…"` alone on a line
    Bare,
}

impl Shape {
    /// Tried in order; the first shape with any match decides.
    const ALL: [Shape; 4] = [Shape::Enclosed, Shape::Leading, Shape::Trailing, Shape::Bare];
}

/// Insertion-ordered counter; ties go to the key seen first.
#[derive(Debug, Default)]
struct Counter(Vec<(char, usize)>);

impl Counter {
    fn bump(&mut self, key: char) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.0.push((key, 1)),
        }
    }

    fn get(&self, key: char) -> usize {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, count)| *count)
    }

    fn most_common(&self) -> Option<char> {
        let mut best: Option<(char, usize)> = None;
        for &(key, count) in &self.0 {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }
}

#[derive(Debug, Default)]
struct Tally {
    matches: usize,
    quotes: Counter,
    delims: Counter,
    spaces: usize,
}

impl Tally {
    fn record(&mut self, quote: char, delim: Option<char>, space: Option<bool>, candidates: &[char]) {
        self.matches += 1;
        self.quotes.bump(quote);
        if let Some(d) = delim {
            if candidates.contains(&d) {
                self.delims.bump(d);
            }
            if space == Some(true) {
                self.spaces += 1;
            }
        }
    }
}

/// Runs the quoted-field pass over `sample`, counting only delimiters from
/// `candidates`.
///
/// Returns `Ok(None)` when the sample contains no quoted fields at all.
pub fn guess(sample: &str, candidates: &[char]) -> Result<Option<QuoteGuess>> {
    for shape in Shape::ALL {
        let tally = tally_shape(shape, sample, candidates)?;
        if tally.matches == 0 {
            continue;
        }

        let Some(quote) = tally.quotes.most_common() else {
            continue;
        };
        let delimiter = tally.delims.most_common();
        let skip_initial_space = delimiter.is_some_and(|d| tally.delims.get(d) == tally.spaces);
        let double_quote = has_doubled_quotes(sample, quote, delimiter)?;

        return Ok(Some(QuoteGuess {
            quote,
            delimiter,
            skip_initial_space,
            double_quote,
        }));
    }

    Ok(None)
}

fn tally_shape(shape: Shape, sample: &str, candidates: &[char]) -> Result<Tally> {
    let mut tally = Tally::default();
    let delimiter_like = if shape == Shape::Enclosed {
        delimiter_like_chars(sample)?
    } else {
        Vec::new()
    };

    for quote in QUOTE_CHARS {
        let q = regex::escape(&quote.to_string());
        match shape {
            Shape::Enclosed => {
                // The closing delimiter must repeat the opening one, so each
                // delimiter-like character gets its own pattern.
                for &delim in &delimiter_like {
                    let d = regex::escape(&delim.to_string());
                    let re = Regex::new(&format!(r"(?s){d}( ?){q}.*?{q}{d}"))?;
                    for caps in re.captures_iter(sample) {
                        let space = caps.get(1).is_some_and(|m| !m.is_empty());
                        tally.record(quote, Some(delim), Some(space), candidates);
                    }
                }
            }
            Shape::Leading | Shape::Trailing => {
                let pattern = if shape == Shape::Leading {
                    format!(r"(?sm)(?:^|\n){q}.*?{q}({DELIM_CLASS})( ?)")
                } else {
                    format!(r"(?sm)({DELIM_CLASS})( ?){q}.*?{q}(?:$|\n)")
                };
                let re = Regex::new(&pattern)?;
                for caps in re.captures_iter(sample) {
                    let delim = caps.get(1).and_then(|m| m.as_str().chars().next());
                    let space = caps.get(2).is_some_and(|m| !m.is_empty());
                    tally.record(quote, delim, Some(space), candidates);
                }
            }
            Shape::Bare => {
                let re = Regex::new(&format!(r"(?sm)(?:^|\n){q}.*?{q}(?:$|\n)"))?;
                for _ in re.find_iter(sample) {
                    tally.record(quote, None, None, candidates);
                }
            }
        }
    }

    Ok(tally)
}

/// Distinct characters of `sample` that could delimit a quoted field, in
/// order of first appearance.
fn delimiter_like_chars(sample: &str) -> Result<Vec<char>> {
    let re = Regex::new(DELIM_CLASS)?;
    let mut seen = Vec::new();
    for m in re.find_iter(sample) {
        if let Some(c) = m.as_str().chars().next() {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
    }
    Ok(seen)
}

/// Looks for a field holding three quote characters on one line, which only
/// happens when embedded quotes are doubled.
fn has_doubled_quotes(sample: &str, quote: char, delimiter: Option<char>) -> Result<bool> {
    let q = regex::escape(&quote.to_string());
    let pattern = match delimiter {
        Some(delim) => {
            let d = regex::escape(&delim.to_string());
            format!(r"(?m)(?:{d}|^)\W*{q}[^{d}\n]*{q}[^{d}\n]*{q}\W*(?:{d}|$)")
        }
        None => format!(r"(?m)\W*{q}[^\n]*{q}[^\n]*{q}\W*"),
    };
    Ok(Regex::new(&pattern)?.is_match(sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: [char; 3] = ['\t', ',', ';'];

    #[test]
    fn unquoted_sample_yields_nothing() {
        let sample = "Title,Date\nThe Wire: Season 1,2020-01-01\n";
        assert_eq!(guess(sample, &CANDIDATES).unwrap(), None);
    }

    #[test]
    fn enclosed_fields_decide_delimiter() {
        let sample = "id;\"The Wire: Season 1\";2020\nid;\"Lost: Episode 2\";2021\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert_eq!(g.quote, '"');
        assert_eq!(g.delimiter, Some(';'));
        assert!(!g.skip_initial_space);
    }

    #[test]
    fn quoted_export_decides_comma() {
        let sample = "\"Title\",\"Date\"\n\"Breaking Bad: Season 1: Pilot\",\"1/20/08\"\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert_eq!(g.quote, '"');
        assert_eq!(g.delimiter, Some(','));
    }

    #[test]
    fn space_after_delimiter_is_detected() {
        let sample = "a, \"b\", c\nd, \"e\", f\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert_eq!(g.delimiter, Some(','));
        assert!(g.skip_initial_space);
    }

    #[test]
    fn non_candidate_delimiters_are_not_counted() {
        let sample = "a|\"b\"|c\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert_eq!(g.quote, '"');
        assert_eq!(g.delimiter, None);
    }

    #[test]
    fn doubled_quotes_are_detected() {
        let sample = "x,\"He said \"\"hi\"\"\",y\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert_eq!(g.delimiter, Some(','));
        assert!(g.double_quote);

        let sample = "x,\"plain\",y\n";
        let g = guess(sample, &CANDIDATES).unwrap().unwrap();
        assert!(!g.double_quote);
    }
}
