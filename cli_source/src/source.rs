//! The contract a configuration source exposes to a configuration loader.
//!
//! Mirrors the shape a layered configuration library expects of its inputs:
//! a source can materialise a nested map, may be able to serve raw bytes,
//! and may support change notification. Sources backed by in-process data
//! decline the latter two by default.

use crate::error::SourceError;
use crate::value::Dict;

/// Callback invoked when a watched source reports a change.
pub type ChangeHandler = Box<dyn FnMut() + Send>;

/// A provider of nested configuration data.
///
/// `read` builds a fresh map on every call; implementations hold no state
/// between calls beyond their (read-only) inputs. `read_bytes` and `watch`
/// default to [`SourceError::Unsupported`]: for sources whose truth is an
/// in-memory structure there is no byte encoding to serve and nothing that
/// can change within one invocation.
pub trait Source {
    /// Stable name of the source, used in error messages and metadata.
    fn name(&self) -> &'static str;

    /// Reads the source and returns a nested configuration map.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source's data cannot be represented
    /// as a well-formed nested map.
    fn read(&self) -> Result<Dict, SourceError>;

    /// Reads the source as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unsupported`] unless the implementation
    /// overrides this with a genuine byte encoding.
    fn read_bytes(&self) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::unsupported(self.name(), "read_bytes"))
    }

    /// Registers a callback to be invoked when the source changes.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unsupported`] unless the implementation can
    /// observe changes. Command-line input is immutable for the lifetime of
    /// an invocation, so flag-backed sources never support this.
    fn watch(&self, on_change: ChangeHandler) -> Result<(), SourceError> {
        drop(on_change);
        Err(SourceError::unsupported(self.name(), "watch"))
    }
}
