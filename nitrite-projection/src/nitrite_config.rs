//! Configuration of the document model.

use crate::common::{ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, NitriteError, NitriteResult};
use crate::FIELD_SEPARATOR;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Public interface for configuring how documents resolve embedded keys.
///
/// The field separator is process-wide: every [`crate::collection::Document`]
/// splits embedded keys such as `address.city` with it. A configuration can
/// be changed until it is initialized; after that it is frozen.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::nitrite_config::NitriteConfig;
///
/// let config = NitriteConfig::new();
/// assert_eq!(config.field_separator(), ".");
/// assert!(config.set_field_separator("").is_err());
///
/// config.initialize();
/// assert!(config.set_field_separator(".").is_err());
/// ```
#[derive(Clone)]
pub struct NitriteConfig {
    inner: Arc<NitriteConfigInner>,
}

impl Default for NitriteConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NitriteConfig {
    pub fn new() -> Self {
        NitriteConfig {
            inner: Arc::new(NitriteConfigInner::new()),
        }
    }

    /// Returns the current field separator.
    pub fn field_separator(&self) -> String {
        self.inner.field_separator()
    }

    /// Sets the field separator for embedded keys.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidOperation`] if the configuration is
    /// initialized or the separator is empty.
    pub fn set_field_separator(&self, separator: &str) -> NitriteResult<()> {
        self.inner.set_field_separator(separator)
    }

    /// Freezes the configuration. Clones share the frozen state.
    pub fn initialize(&self) {
        self.inner.initialize()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }
}

struct NitriteConfigInner {
    configured: AtomicBool,
}

impl NitriteConfigInner {
    fn new() -> Self {
        NitriteConfigInner {
            configured: AtomicBool::new(false),
        }
    }

    fn field_separator(&self) -> String {
        FIELD_SEPARATOR.read_with(|it| it.clone())
    }

    fn set_field_separator(&self, separator: &str) -> NitriteResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("Field separator cannot be changed after initialization");
            return Err(NitriteError::new(
                "Field separator cannot be changed after initialization",
                ErrorKind::InvalidOperation,
            ));
        }

        if separator.is_empty() {
            log::error!("Field separator cannot be empty");
            return Err(NitriteError::new(
                "Field separator cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        FIELD_SEPARATOR.write_with(|it| *it = separator.to_string());
        log::debug!("Field separator set to {:?}", separator);
        Ok(())
    }

    fn initialize(&self) {
        self.configured.store(true, Ordering::Relaxed);
    }

    fn is_initialized(&self) -> bool {
        self.configured.load(Ordering::Relaxed)
    }
}
