//! Frequency pass of the dialect sniffer.
//!
//! A delimiter shows up the same number of times on (nearly) every line.
//! Lines are examined in chunks; for each candidate the most common per-line
//! count is weighed against the lines that disagree with it, and the first
//! candidate that is consistent enough wins.

/// Lines examined per chunk.
const CHUNK_LINES: usize = 10;

/// Lowest share of agreeing lines accepted.
const CONSISTENCY_THRESHOLD: f64 = 0.9;

/// Tie-break order when several candidates are equally consistent.
const PREFERRED: [char; 5] = [',', '\t', ';', ' ', ':'];

/// Delimiter inferred by the frequency pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyGuess {
    /// The inferred delimiter.
    pub delimiter: char,
    /// The first line puts a space after every occurrence of the delimiter.
    pub skip_initial_space: bool,
}

/// The dominant per-line count of one character and how strongly it dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Mode {
    count: usize,
    weight: i64,
}

/// Per-line count histogram for one candidate, in first-seen order.
#[derive(Debug, Default)]
struct Histogram(Vec<(usize, i64)>);

impl Histogram {
    fn add(&mut self, count: usize) {
        match self.0.iter_mut().find(|(c, _)| *c == count) {
            Some((_, lines)) => *lines += 1,
            None => self.0.push((count, 1)),
        }
    }

    fn mode(&self) -> Option<Mode> {
        if let [(0, _)] = self.0.as_slice() {
            return None;
        }

        let mut top = *self.0.first()?;
        for &entry in &self.0[1..] {
            if entry.1 > top.1 {
                top = entry;
            }
        }
        let disagreeing: i64 = self.0.iter().map(|(_, lines)| lines).sum::<i64>() - top.1;

        Some(Mode {
            count: top.0,
            weight: top.1 - disagreeing,
        })
    }
}

/// Runs the frequency pass over `sample`, considering only `candidates`.
///
/// Returns `None` when no candidate is consistent across the sample.
pub fn guess(sample: &str, candidates: &[char]) -> Option<FrequencyGuess> {
    let lines: Vec<&str> = sample.split('\n').filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return None;
    }

    let mut candidates = candidates.to_vec();
    candidates.sort_unstable();
    candidates.dedup();

    let chunk = CHUNK_LINES.min(lines.len());
    let mut histograms: Vec<Histogram> = candidates.iter().map(|_| Histogram::default()).collect();
    let mut delims: Vec<(char, Mode)> = Vec::new();

    for (iteration, block) in lines.chunks(chunk).enumerate() {
        for line in block {
            for (histogram, &c) in histograms.iter_mut().zip(&candidates) {
                histogram.add(line.matches(c).count());
            }
        }

        let modes: Vec<(char, Mode)> = candidates
            .iter()
            .zip(&histograms)
            .filter_map(|(&c, h)| h.mode().map(|m| (c, m)))
            .collect();

        let total = (chunk * (iteration + 1)).min(lines.len()) as f64;
        let mut consistency = 1.0_f64;
        while delims.is_empty() && consistency >= CONSISTENCY_THRESHOLD {
            for &(c, mode) in &modes {
                if mode.count > 0 && mode.weight > 0 && mode.weight as f64 / total >= consistency {
                    delims.push((c, mode));
                }
            }
            consistency -= 0.01;
        }

        if let [(delimiter, _)] = delims.as_slice() {
            return Some(guess_for(*delimiter, lines[0]));
        }
    }

    if delims.is_empty() {
        return None;
    }

    if let Some(&delimiter) = PREFERRED
        .iter()
        .find(|p| delims.iter().any(|(c, _)| c == *p))
    {
        return Some(guess_for(delimiter, lines[0]));
    }

    delims
        .iter()
        .max_by_key(|(c, mode)| (*mode, *c))
        .map(|&(delimiter, _)| guess_for(delimiter, lines[0]))
}

fn guess_for(delimiter: char, first_line: &str) -> FrequencyGuess {
    let spaced = format!("{delimiter} ");
    FrequencyGuess {
        delimiter,
        skip_initial_space: first_line.matches(delimiter).count()
            == first_line.matches(spaced.as_str()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: [char; 3] = ['\t', ',', ';'];

    #[test]
    fn consistent_comma_wins() {
        let sample = "Title,Date\nThe Wire: Season 1,2020\nInception,2021\n";
        let g = guess(sample, &CANDIDATES).unwrap();
        assert_eq!(g.delimiter, ',');
        assert!(!g.skip_initial_space);
    }

    #[test]
    fn tab_wins_over_stray_commas() {
        let sample = "Title\tDate\nWell, Season 1\t2020\nA, B, and C: Part 2\t2021\nPlain\t2022\n";
        let g = guess(sample, &CANDIDATES).unwrap();
        assert_eq!(g.delimiter, '\t');
    }

    #[test]
    fn semicolon_is_detected() {
        let sample = "Title;Date;Profile\nLost: Episode 1;2020;Kids\nLost: Episode 2;2020;Kids\n";
        assert_eq!(guess(sample, &CANDIDATES).unwrap().delimiter, ';');
    }

    #[test]
    fn preferred_order_breaks_ties() {
        let sample = "a,b;c\nd,e;f\n";
        assert_eq!(guess(sample, &CANDIDATES).unwrap().delimiter, ',');
    }

    #[test]
    fn skip_initial_space_from_first_line() {
        let sample = "a, b, c\nd, e, f\n";
        assert!(guess(sample, &CANDIDATES).unwrap().skip_initial_space);
    }

    #[test]
    fn single_column_has_no_delimiter() {
        assert_eq!(guess("Breaking Bad: S01E01\nBreaking Bad: S01E02\n", &CANDIDATES), None);
        assert_eq!(guess("", &CANDIDATES), None);
        assert_eq!(guess("\n\n", &CANDIDATES), None);
    }

    #[test]
    fn inconsistent_counts_are_rejected() {
        let sample = "a,b\nc\nd,e,f,g\nh\n";
        assert_eq!(guess(sample, &CANDIDATES), None);
    }
}
