//! Intervention identifiers

use std::fmt;

/// Unique identifier for an intervention record
///
/// Upstream rows are keyed by UUID. Ids minted locally (fixtures, imports
/// without an id) use UUIDv7 so they sort chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterventionId(u128);

impl InterventionId {
    /// Generate a new UUIDv7-based id
    ///
    /// # Examples
    ///
    /// ```
    /// use alma_domain::InterventionId;
    ///
    /// let id = InterventionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an id from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an id from its textual UUID form
    ///
    /// Any RFC 9562 UUID is accepted, not only v7, since upstream ids are
    /// generated by the hosted backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use alma_domain::InterventionId;
    ///
    /// let id = InterventionId::new();
    /// let parsed = InterventionId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid intervention id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for InterventionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InterventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl std::str::FromStr for InterventionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upstream_v4_id() {
        let id = InterventionId::from_string("6f1c2d4e-8a9b-4c3d-9e8f-0a1b2c3d4e5f").unwrap();
        assert_eq!(id.to_string(), "6f1c2d4e-8a9b-4c3d-9e8f-0a1b2c3d4e5f");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = InterventionId::new();
        let padded = format!("  {}\n", id);
        assert_eq!(InterventionId::from_string(&padded).unwrap(), id);
    }

    #[test]
    fn test_invalid_id() {
        let err = InterventionId::from_string("not-a-uuid").unwrap_err();
        assert!(err.contains("not-a-uuid"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(InterventionId::new(), InterventionId::new());
    }
}
