//! Redacting wrapper for credential material
//!
//! Client secrets and bearer tokens travel through config structs and HTTP
//! clients that derive `Debug`. Wrapping them in `Sensitive<T>` keeps them out
//! of every log line and error message.

use std::fmt;

/// Value that prints as `***REDACTED***` under both `Debug` and `Display`
///
/// ```
/// use fabmig_core_types::Sensitive;
///
/// let token = Sensitive::new("eyJ0eXAiOi...");
/// assert_eq!(format!("{token:?}"), "***REDACTED***");
/// assert_eq!(token.expose(), &"eyJ0eXAiOi...");
/// ```
pub struct Sensitive<T>(T);

const REDACTED: &str = "***REDACTED***";

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret, e.g. to put it on the wire
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}
