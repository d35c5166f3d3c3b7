//! Competitive-programming account handle.

use std::fmt;

/// Validation errors returned by [`UserHandle::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleValidationError {
    /// The candidate was empty or contained only whitespace.
    #[error("handle must not be blank")]
    Blank,
}

/// Handle identifying an account to the recommendation backend.
///
/// ## Invariants
/// - The handle is never empty and never whitespace-only.
/// - The raw text is kept verbatim; the backend alone decides whether the
///   account exists, so no trimming or case folding happens here.
///
/// # Examples
/// ```
/// use recommender_frontend::domain::UserHandle;
///
/// let handle = UserHandle::new("tourist").expect("non-blank handle");
/// assert_eq!(handle.as_ref(), "tourist");
/// assert!(UserHandle::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserHandle(String);

impl UserHandle {
    /// Validate and construct a [`UserHandle`].
    pub fn new(handle: impl Into<String>) -> Result<Self, HandleValidationError> {
        Self::from_owned(handle.into())
    }

    fn from_owned(handle: String) -> Result<Self, HandleValidationError> {
        if handle.trim().is_empty() {
            return Err(HandleValidationError::Blank);
        }
        Ok(Self(handle))
    }
}

impl AsRef<str> for UserHandle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserHandle> for String {
    fn from(value: UserHandle) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserHandle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
