/// Errors raised while loading, building or rendering a secret
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// Structurally invalid input: wrong length, bad symbol, wrong record kind
    #[error("invalid secret format: {0}")]
    Format(String),

    /// The stored checksum bits do not match the recomputed checksum
    #[error("checksum does not match expected value (stored={stored:#x}, calculated={computed:#x})")]
    InvalidChecksum { stored: u8, computed: u8 },

    /// A character has no glyph in the selected region's table
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    /// A byte has no glyph in the selected region's table
    #[error("byte {0:#04x} has no displayable character")]
    UnmappedByte(u8),

    /// A field value does not fit in its bit width
    #[error("{field} value {value} is out of range (max {max})")]
    Range {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

impl SecretError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// True for both directions of a missing glyph mapping
    pub fn is_unsupported_character(&self) -> bool {
        matches!(self, Self::UnsupportedCharacter(_) | Self::UnmappedByte(_))
    }
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Reject `value` above `max` for the named field
pub(crate) fn check_range(field: &'static str, value: u32, max: u32) -> Result<()> {
    if value > max {
        return Err(SecretError::Range { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SecretError::Range {
            field: "behavior",
            value: 64,
            max: 63,
        };
        assert_eq!(err.to_string(), "behavior value 64 is out of range (max 63)");

        let err = SecretError::InvalidChecksum {
            stored: 6,
            computed: 3,
        };
        assert!(err.to_string().contains("stored=0x6"));
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("behavior", 63, 63).is_ok());
        assert_eq!(
            check_range("animal", 16, 15),
            Err(SecretError::Range {
                field: "animal",
                value: 16,
                max: 15
            })
        );
    }

    #[test]
    fn test_unsupported_character_family() {
        assert!(SecretError::UnsupportedCharacter('€').is_unsupported_character());
        assert!(SecretError::UnmappedByte(0x01).is_unsupported_character());
        assert!(!SecretError::format("wrong length").is_unsupported_character());
    }
}
