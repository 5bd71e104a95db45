//! # Showlist Core
//!
//! Extracts the unique series names from a delimited export of media titles.
//! Titles carrying a season or episode marker are cut back to their series
//! base name (the text before the first colon), deduplicated and sorted.
//!
//! ## Quick Start
//!
//! ```rust
//! use showlist_core::{ExtractConfig, Extractor};
//!
//! let extractor = Extractor::new(ExtractConfig::new()).unwrap();
//! let scan = extractor
//!     .scan("Title;Date\nDark: Season 1: Secrets;2020\nDark: Season 2;2021\nRoma;2021\n")
//!     .unwrap();
//!
//! assert_eq!(scan.dialect.delimiter, b';');
//! assert_eq!(scan.series.into_sorted(), vec!["Dark"]);
//! ```
pub mod classify;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod series;
pub mod source;
pub mod text;

// Re-export primary API
pub use classify::{EPISODE_PATTERN, EpisodeClassifier, base_name};
pub use dialect::{Dialect, Sniffer};
pub use error::{Result, ShowlistError};
pub use extract::{
    DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, ExtractConfig, ExtractSummary, Extractor, Scan,
    ScanStats,
};
pub use series::SeriesSet;
pub use source::{TITLE_COLUMN, TitleReader, TitleSource};
pub use text::normalize;
