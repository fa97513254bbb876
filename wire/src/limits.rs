//! Configurable limits for bounded decoding.

/// Limits enforced while decoding records.
///
/// Length and count prefixes come from untrusted input; they are checked
/// against these limits before any allocation or iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of a single string or binary payload in bytes.
    pub max_string_bytes: usize,

    /// Maximum element count of a single list, set or map.
    pub max_container_len: usize,

    /// Maximum nesting of structs and containers, the outermost record included.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_bytes: 16 * 1024 * 1024,
            max_container_len: 1024 * 1024,
            max_depth: 64,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_string_bytes: 1024,
            max_container_len: 64,
            max_depth: 8,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_string_bytes: usize::MAX,
            max_container_len: usize::MAX,
            max_depth: usize::MAX,
        }
    }
}
