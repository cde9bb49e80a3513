//! Error types for bounded grids and inventory selection

use thiserror::Error;

/// Errors raised by the bounded parts of the core.
///
/// The infinite world never produces these; it grows instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("coordinate ({x}, {y}) outside of {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("inventory slot {index} out of range (slots: {len})")]
    InventorySlot { index: usize, len: usize },

    #[error("inventory needs at least one slot")]
    EmptyInventory,
}

pub type Result<T> = std::result::Result<T, WorldError>;
