//! Time-ordered unique ID generation.
//!
//! IDs are UUIDv7 values: globally unique and sortable by creation time.
//! The generator is constructed once at startup and passed explicitly to
//! the components that mint IDs, so tests can substitute a deterministic
//! source.

use uuid::Uuid;

/// Produces globally unique, time-ordered identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    /// Create a new ID generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the next identifier.
    pub fn next_id(&self) -> Uuid {
        Uuid::now_v7()
    }
}
