use crate::common::NO2;
use crate::errors::{ErrorKind, NitriteError, NitriteResult};
use crate::ID_GENERATOR;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};

static MAX_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(19));
static MIN_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(18));

/// The store-internal identity of a document.
///
/// Every record handed out by a record source carries its `NitriteId` in the
/// reserved `_id` field. The identity belongs to the store, not to the domain
/// object, which is why projections strip it before mapping.
///
/// Ids are 64-bit unsigned integers in the range [10^18, 10^19), produced by a
/// Snowflake-like generator.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::collection::NitriteId;
///
/// let generated = NitriteId::new();
/// assert_eq!(generated.id_value().to_string().len(), 19);
///
/// let explicit = NitriteId::create_id(1000000000000000001).unwrap();
/// assert_eq!(explicit.id_value(), 1000000000000000001);
/// assert!(NitriteId::create_id(42).is_err());
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NitriteId {
    id_value: u64,
}

impl NitriteId {
    /// Generates a new unique `NitriteId`.
    pub fn new() -> Self {
        NitriteId {
            id_value: ID_GENERATOR.get_id(),
        }
    }

    /// Creates a `NitriteId` from a specific value.
    ///
    /// Fails with [`ErrorKind::InvalidId`] if the value is outside [10^18, 10^19).
    pub fn create_id(id_value: u64) -> NitriteResult<NitriteId> {
        NitriteId::valid_id(id_value)?;
        Ok(NitriteId { id_value })
    }

    pub fn id_value(&self) -> u64 {
        self.id_value
    }

    pub(crate) fn valid_id(id_value: u64) -> NitriteResult<bool> {
        if id_value >= *MAX_VALUE {
            log::error!("Id value {} is too large", id_value);
            return Err(NitriteError::new(
                &format!(
                    "NitriteId validation error: id value must be less than 10^19 ({})",
                    *MAX_VALUE
                ),
                ErrorKind::InvalidId,
            ));
        } else if id_value < *MIN_VALUE {
            log::error!("Id value {} is too small", id_value);
            return Err(NitriteError::new(
                &format!(
                    "NitriteId validation error: id value must be greater than or equal to 10^18 ({})",
                    *MIN_VALUE
                ),
                ErrorKind::InvalidId,
            ));
        }

        Ok(true)
    }
}

impl Default for NitriteId {
    fn default() -> Self {
        NitriteId::new()
    }
}

impl Debug for NitriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.id_value, NO2)
    }
}

impl Display for NitriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{}", self.id_value, NO2)
    }
}
