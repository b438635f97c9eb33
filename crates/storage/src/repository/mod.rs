pub mod award;
pub mod directory;
pub mod engagement;
pub mod score;

use std::str::FromStr;

use crate::error::{Result, StorageError};

/// Parses a text column into one of the model enums. A value the enum does
/// not know means the row itself is bad, not the caller's input.
fn decode<T>(column: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = StorageError>,
{
    raw.parse()
        .map_err(|_| StorageError::InvalidData(format!("{column}: unexpected value '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompetitionFormat;

    #[test]
    fn test_decode_known_value() {
        let format: CompetitionFormat = decode("format", "team").unwrap();
        assert_eq!(format, CompetitionFormat::Team);
    }

    #[test]
    fn test_decode_unknown_value_is_invalid_data() {
        let err = decode::<CompetitionFormat>("format", "relay").unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(msg) if msg.contains("relay")));
    }
}
