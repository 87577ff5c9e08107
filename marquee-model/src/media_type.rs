use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::ModelError;

/// Simple enum for the two playable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaType {
    /// Movie media type
    Movie = 0,
    /// Series media type
    Series = 1,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }

    /// Storage encoding used by the catalog tables.
    pub fn as_i16(&self) -> i16 {
        *self as i16
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
        }
    }
}

impl TryFrom<i16> for MediaType {
    type Error = ModelError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MediaType::Movie),
            1 => Ok(MediaType::Series),
            other => Err(ModelError::InvalidMediaType(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_roundtrip() {
        for mt in [MediaType::Movie, MediaType::Series] {
            assert_eq!(MediaType::try_from(mt.as_i16()).unwrap(), mt);
        }
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        assert!(MediaType::try_from(7).is_err());
    }
}
