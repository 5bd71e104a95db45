use std::string::FromUtf8Error;

use thiserror::Error;

/// Why a mojibake repair attempt was abandoned.
#[derive(Debug, Error)]
pub enum RepairError {
    /// A code point does not fit in a single Latin-1 byte, so the text
    /// cannot have come from a byte-per-character misdecoding.
    #[error("character {ch:?} at position {index} is outside Latin-1")]
    OutsideLatin1 {
        /// The offending character.
        ch: char,
        /// Its position, counted in characters.
        index: usize,
    },

    /// The reinterpreted bytes are not valid UTF-8.
    #[error("reinterpreted bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Reverses UTF-8 text that was misread as Latin-1.
///
/// Every character is mapped back to the byte it was decoded from and the
/// resulting buffer is decoded again as UTF-8. Plain ASCII comes back
/// unchanged.
///
/// # Errors
///
/// Returns [`RepairError`] when the string cannot be the product of such a
/// misdecoding. Callers are expected to keep the original text in that case.
///
/// # Examples
/// ```
/// use showlist_core::text::repair_mojibake;
///
/// assert_eq!(repair_mojibake("CafÃ©").unwrap(), "Café");
/// assert!(repair_mojibake("Café").is_err());
/// ```
pub fn repair_mojibake(input: &str) -> Result<String, RepairError> {
    let bytes = input
        .chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| RepairError::OutsideLatin1 { ch, index }))
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_unchanged() {
        assert_eq!(repair_mojibake("The Wire: Season 1").unwrap(), "The Wire: Season 1");
    }

    #[test]
    fn misdecoded_utf8_is_restored() {
        assert_eq!(repair_mojibake("PokÃ©mon: Episode 1").unwrap(), "Pokémon: Episode 1");
        assert_eq!(repair_mojibake("Ã\u{89}lite").unwrap(), "Élite");
    }

    #[test]
    fn genuine_latin1_is_rejected() {
        // A lone 0xE9 byte is not valid UTF-8.
        assert!(matches!(
            repair_mojibake("Amélie"),
            Err(RepairError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn wide_characters_are_rejected() {
        match repair_mojibake("進撃の巨人") {
            Err(RepairError::OutsideLatin1 { ch, index }) => {
                assert_eq!(ch, '進');
                assert_eq!(index, 0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn replacement_character_is_rejected() {
        assert!(repair_mojibake("Broken \u{FFFD} Title").is_err());
    }
}
