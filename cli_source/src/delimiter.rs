//! The separator used to join command paths and split them back apart.

/// Separator between path segments in a flattened configuration key.
///
/// The same delimiter joins command names into a level's prefix and splits a
/// flat key back into nested mapping levels. The empty delimiter selects
/// flat/no-nesting mode; hierarchical collection never operates with an
/// empty delimiter.
///
/// # Examples
///
/// ```rust
/// use cli_source::Delimiter;
/// let delimiter = Delimiter::default();
/// assert_eq!(delimiter.as_str(), ".");
/// assert!(Delimiter::flat().is_flat());
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Delimiter(String);

impl Delimiter {
    /// Creates a delimiter from a raw separator string.
    ///
    /// An empty string is preserved and denotes flat mode; use
    /// [`Delimiter::default`] for the conventional `.` separator.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The empty delimiter, selecting flat/no-nesting mode.
    #[must_use]
    pub const fn flat() -> Self {
        Self(String::new())
    }

    /// Returns `true` when the delimiter is empty and no nesting applies.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the separator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins path segments with the separator.
    #[must_use]
    pub fn join(&self, segments: &[&str]) -> String {
        segments.join(&self.0)
    }
}

impl Default for Delimiter {
    /// The conventional `.` separator.
    fn default() -> Self {
        Self(".".to_owned())
    }
}
