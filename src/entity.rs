//! Entities: the player and the things that share the dungeon with them.

use std::convert::TryFrom;

use crate::error::Error;
use crate::error::Result;
use crate::geo::Point;
use crate::gfx::texel::Rgb;

/// The kinds of entity that can appear on a map.
///
/// Discriminants are stable, so raw values can round-trip through
/// [`EntityType::from_ordinal()`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum EntityType {
  Player = 0,
  Ogre = 1,
  Goblin = 2,
}

impl EntityType {
  /// Every entity type, in ordinal order.
  pub const ALL: [EntityType; 3] =
    [EntityType::Player, EntityType::Ogre, EntityType::Goblin];

  /// Converts a raw ordinal into an `EntityType`.
  pub fn from_ordinal(ordinal: u8) -> Result<Self> {
    Self::ALL
      .iter()
      .copied()
      .find(|t| t.ordinal() == ordinal)
      .ok_or(Error::LookupOutOfRange { ordinal })
  }

  /// Returns this type's ordinal.
  #[inline]
  pub fn ordinal(self) -> u8 {
    self as u8
  }

  /// Returns the glyph and color this type is drawn with.
  pub fn face(self) -> Face {
    let (glyph, (r, g, b)) = match self {
      EntityType::Player => ('@', (255, 255, 255)),
      EntityType::Ogre => ('o', (255, 197, 0)),
      EntityType::Goblin => ('g', (18, 102, 0)),
    };
    Face {
      glyph,
      color: Rgb::new(r, g, b),
    }
  }
}

impl TryFrom<u8> for EntityType {
  type Error = Error;

  fn try_from(ordinal: u8) -> Result<Self> {
    Self::from_ordinal(ordinal)
  }
}

/// The visual representation of an entity: a glyph and its color.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Face {
  pub glyph: char,
  pub color: Rgb,
}

/// Looks up the face for a raw entity type value.
///
/// Values outside the known types are an error rather than a default face.
pub fn face_of_ordinal(ordinal: u8) -> Result<Face> {
  EntityType::from_ordinal(ordinal).map(EntityType::face)
}

/// A positioned entity.
///
/// Entities are plain values owned by whichever list the caller keeps them in.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Entity {
  pub pos: Point,
  pub kind: EntityType,
}

impl Entity {
  /// Creates a new `Entity` of the given type at `pos`.
  pub fn new(pos: Point, kind: EntityType) -> Self {
    Self { pos, kind }
  }

  /// Moves this entity by `offset`.
  ///
  /// No bounds checking is done; callers must make sure the destination is
  /// walkable.
  #[inline]
  pub fn move_by(&mut self, offset: Point) {
    self.pos += offset;
  }

  /// Returns the glyph and color this entity is drawn with.
  #[inline]
  pub fn face(&self) -> Face {
    self.kind.face()
  }
}
