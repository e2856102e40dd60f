// Tool configuration
// Settings shared by the artifact readers/writers and the command line

use crate::rsa::KeyStrength;

/// Lines starting with this character are annotations, not values
pub const DEFAULT_COMMENT_MARKER: char = '#';

/// Configuration for key, ciphertext and plaintext files
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileConfig {
    pub comment_marker: char,
    pub default_strength: KeyStrength,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER,
            default_strength: KeyStrength::default(),
        }
    }
}

impl FileConfig {
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn with_default_strength(mut self, strength: KeyStrength) -> Self {
        self.default_strength = strength;
        self
    }

    /// Whether `line` is an annotation line
    pub fn is_comment(&self, line: &str) -> bool {
        line.starts_with(self.comment_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.comment_marker, '#');
        assert_eq!(config.default_strength, KeyStrength::Bits1024);
    }

    #[test]
    fn test_builders() {
        let config = FileConfig::default()
            .with_comment_marker(';')
            .with_default_strength(KeyStrength::Bits2048);
        assert!(config.is_comment("; note"));
        assert!(!config.is_comment("# note"));
        assert!(!config.is_comment(" ; indented"));
        assert_eq!(config.default_strength.bits(), 2048);
    }
}
