//! Error types.

use thiserror::Error;

use crate::geo::Point;

/// A result whose error type is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while building or populating a dungeon.
///
/// Terminal failures are not represented here; see [`crate::gfx::terminal`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  /// A room is too small to have an interior once its walls are excluded.
  #[error(
    "room at ({}, {}) is {width}x{height}; rooms must be at least 3x3",
    .origin.x(),
    .origin.y()
  )]
  InvalidRoomDimensions {
    origin: Point,
    width: i64,
    height: i64,
  },

  /// A raw entity type value has no entry in the glyph table.
  #[error("entity type {ordinal} has no face")]
  LookupOutOfRange { ordinal: u8 },

  /// Spawn settings that cannot be sampled from.
  #[error("invalid spawn config: {0}")]
  InvalidSpawnConfig(String),
}
