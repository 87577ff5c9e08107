use crate::error::{ModelError, Result};
use uuid::Uuid;

/// Stable local identifier assigned when a title is first synchronized
/// into the catalog. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogId(pub Uuid);

impl Default for CatalogId {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogId {
    pub fn new() -> Self {
        CatalogId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for CatalogId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the active viewing profile. A profile is a lightweight
/// "who is watching" context, not an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileId(pub Uuid);

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileId {
    pub fn new() -> Self {
        ProfileId(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self> {
        Uuid::parse_str(id).map(ProfileId).map_err(|_| {
            ModelError::InvalidIdentifier(format!(
                "profile id is not a valid uuid: {id}"
            ))
        })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier in the external metadata provider's namespace.
/// Provider-assigned and stable; `Display` renders the canonical decimal
/// form used for availability-set membership.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TmdbId(pub u64);

impl TmdbId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TmdbId {
    fn from(raw: u64) -> Self {
        TmdbId(raw)
    }
}

impl std::fmt::Display for TmdbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmdb_id_canonical_form_is_decimal() {
        assert_eq!(TmdbId(60625).to_string(), "60625");
    }

    #[test]
    fn profile_id_rejects_garbage() {
        assert!(ProfileId::from_string("not-a-uuid").is_err());
    }
}
