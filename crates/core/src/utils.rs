//! Shared helpers: tri-state field patches for update operations.

use serde::{Deserialize, Deserializer};

/// Tri-state patch for a nullable field.
///
/// Update payloads need to distinguish "field not present" (keep the stored
/// value) from "field explicitly cleared" (set to NULL). A plain
/// `Option<Option<T>>` loses the first distinction under most serde shapes,
/// so updates carry this enum instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field absent from the update; keep the stored value.
    #[default]
    Keep,
    /// Field explicitly cleared.
    Clear,
    /// Field set to a new value.
    Set(T),
}

impl<T> Patch<T> {
    /// Resolves the patch against the currently stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(value) => Patch::Set(value),
        }
    }
}

// A missing field keeps the default (`Keep`) via #[serde(default)]; an
// explicit null deserializes to `Clear`; a value deserializes to `Set`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Clear,
            Some(value) => Patch::Set(value),
        })
    }
}
