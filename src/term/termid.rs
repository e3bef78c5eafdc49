use core::fmt::Debug;
use std::fmt::Display;

use crate::{GoError, GoResult};

/// A unique identifier of a GO term, e.g. `GO:0008152`
///
/// Ids are stored as the numerical part of the accession, so copying and
/// comparing them is cheap.
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl TryFrom<&str> for GoTermId {
    type Error = GoError;

    /// Parses a `GO:0000000`-style accession
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidTermId`] if the prefix or the numerical part
    /// is malformed
    fn try_from(s: &str) -> GoResult<Self> {
        let digits = s
            .strip_prefix("GO:")
            .ok_or_else(|| GoError::InvalidTermId(s.to_string()))?;
        let inner = digits
            .parse::<u32>()
            .map_err(|_| GoError::InvalidTermId(s.to_string()))?;
        Ok(GoTermId { inner })
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl From<u16> for GoTermId {
    fn from(n: u16) -> Self {
        Self { inner: n.into() }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GO:{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        match GoTermId::try_from(other) {
            Ok(other) => self == &other,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_valid_id() {
        let id = GoTermId::try_from("GO:0048364").unwrap();
        assert_eq!(id, GoTermId::from(48_364u32));
        assert_eq!(id.to_string(), "GO:0048364");
    }

    #[test]
    fn parse_invalid_ids() {
        assert!(GoTermId::try_from("HP:0048364").is_err());
        assert!(GoTermId::try_from("GO:abc").is_err());
        assert!(GoTermId::try_from("0048364").is_err());
    }

    #[test]
    fn compare_to_str() {
        let id = GoTermId::from(8152u32);
        assert!(id == *"GO:0008152");
        assert!(id != *"GO:0008150");
        assert!(id != *"not a term id");
    }
}
