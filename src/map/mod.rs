//! Dungeon maps.

use rand::distributions::Distribution as _;
use rand::distributions::Uniform;
use rand::Rng;

use crate::error::Error;
use crate::error::Result;
use crate::geo::Point;
use crate::geo::Rect;
use crate::geo::RectVec;

pub mod fov;

pub use fov::FovMap;

/// A single map cell.
///
/// Variants are ordered by precedence: when two features are carved over the
/// same cell, the greater one wins, so corridors punch doors through walls.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Tile {
  Void,
  Wall,
  Ground,
}

/// A rectangular room, including its one-cell wall border.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Room {
  pub origin: Point,
  pub width: i64,
  pub height: i64,
}

impl Room {
  /// Creates a new `Room` with its upper-left wall at `(x, y)`.
  pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
    Self {
      origin: Point::new(x, y),
      width,
      height,
    }
  }

  /// Creates a `Room` covering `rect`.
  pub fn from_rect(rect: Rect) -> Self {
    Self {
      origin: rect.upper_left(),
      width: rect.width(),
      height: rect.height(),
    }
  }

  /// Returns the cells covered by this room, walls included.
  pub fn rect(self) -> Rect {
    Rect::new(self.origin, self.origin + Point::new(self.width, self.height))
  }

  /// Returns the center of this room.
  pub fn center(self) -> Point {
    self.rect().center()
  }

  /// Returns the walkable cells of this room: everything but the wall border.
  ///
  /// Fails if the room is narrower or shorter than three cells, since such a
  /// room has no interior.
  pub fn interior(self) -> Result<Rect> {
    if self.width < 3 || self.height < 3 {
      return Err(Error::InvalidRoomDimensions {
        origin: self.origin,
        width: self.width,
        height: self.height,
      });
    }

    Ok(Rect::new(
      self.origin + Point::new(1, 1),
      self.origin + Point::new(self.width - 1, self.height - 1),
    ))
  }
}

/// A single dungeon level: a fixed-size grid of tiles and the rooms carved
/// into it.
#[derive(Clone, Debug)]
pub struct GameMap {
  tiles: RectVec<Tile>,
  rooms: Vec<Room>,
}

impl GameMap {
  /// Creates a new map covering `bounds`, filled with [`Tile::Void`].
  pub fn new(bounds: Rect) -> GameMap {
    GameMap {
      tiles: RectVec::new(bounds, Tile::Void),
      rooms: Vec::new(),
    }
  }

  /// Returns the region this map covers.
  pub fn bounds(&self) -> Rect {
    self.tiles.dims()
  }

  /// Returns the rooms carved so far, in the order they were added.
  pub fn rooms(&self) -> &[Room] {
    &self.rooms
  }

  /// Returns the tile at `pos`; everything outside the map is void.
  pub fn tile(&self, pos: Point) -> Tile {
    self.tiles.get(pos).copied().unwrap_or(Tile::Void)
  }

  /// Returns whether an entity could stand at `pos`.
  pub fn is_walkable(&self, pos: Point) -> bool {
    self.tile(pos) == Tile::Ground
  }

  /// Returns an iterator over every cell and its tile.
  pub fn tiles(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
    self.tiles.points().map(|(p, t)| (p, *t))
  }

  fn carve(&mut self, pos: Point, tile: Tile) {
    if let Some(slot) = self.tiles.get_mut(pos) {
      if tile > *slot {
        *slot = tile;
      }
    }
  }

  /// Carves `room` into the map and records it.
  ///
  /// Cells outside the map are ignored.
  pub fn add_room(&mut self, room: Room) {
    let rect = room.rect();
    let (ul, lr) = rect.corners();
    for p in rect.points() {
      let on_edge = p.x() == ul.x()
        || p.x() == lr.x() - 1
        || p.y() == ul.y()
        || p.y() == lr.y() - 1;
      self.carve(p, if on_edge { Tile::Wall } else { Tile::Ground });
    }
    self.rooms.push(room);
  }

  /// Carves a walled horizontal corridor starting at `start` and running
  /// `len` cells (leftwards if negative).
  pub fn add_horizontal(&mut self, start: Point, len: i64) {
    for dx in 0..=len.abs() {
      for dy in -1..=1 {
        let tile = if dy == 0 { Tile::Ground } else { Tile::Wall };
        self.carve(start + Point::new(dx * len.signum(), dy), tile);
      }
    }
  }

  /// Carves a walled vertical corridor starting at `start` and running `len`
  /// cells (upwards if negative).
  pub fn add_vertical(&mut self, start: Point, len: i64) {
    for dy in 0..=len.abs() {
      for dx in -1..=1 {
        let tile = if dx == 0 { Tile::Ground } else { Tile::Wall };
        self.carve(start + Point::new(dx, dy * len.signum()), tile);
      }
    }
  }

  /// Attempts to place `count` non-overlapping rooms inside the map, joining
  /// each new room to the previous one with an L-shaped corridor.
  ///
  /// Room sides are drawn from `min_side..=max_side`; attempts that would
  /// overlap an existing room are dropped, so fewer than `count` rooms may be
  /// placed. Returns the rooms placed by this call.
  pub fn rooms_and_corridors<R: Rng + ?Sized>(
    &mut self,
    rng: &mut R,
    count: usize,
    min_side: i64,
    max_side: i64,
  ) -> &[Room] {
    let first = self.rooms.len();
    let bounds = self.bounds();
    let max_side = max_side.min(bounds.width()).min(bounds.height());
    if min_side > max_side {
      return &self.rooms[first..];
    }

    let sides = Uniform::new_inclusive(min_side, max_side);
    let (start, end) = bounds.corners();
    for _ in 0..count {
      let w = sides.sample(rng);
      let h = sides.sample(rng);
      let x = rng.gen_range(start.x()..=end.x() - w);
      let y = rng.gen_range(start.y()..=end.y() - h);

      let room = Room::new(x, y, w, h);
      if self.rooms.iter().any(|r| r.rect().intersect(room.rect()).is_some()) {
        continue;
      }

      let prev = self.rooms.last().copied();
      self.add_room(room);

      if let Some(prev) = prev {
        let (a, b) = (prev.center(), room.center());
        if rng.gen_bool(0.5) {
          self.add_horizontal(a, b.x() - a.x());
          self.add_vertical(b, a.y() - b.y());
        } else {
          self.add_vertical(a, b.y() - a.y());
          self.add_horizontal(b, a.x() - b.x());
        }
      }
    }

    &self.rooms[first..]
  }
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng as _;
  use rand_chacha::ChaCha8Rng;

  use super::*;

  #[test]
  fn interior_excludes_walls() {
    let interior = Room::new(0, 0, 5, 5).interior().unwrap();
    assert_eq!(
      interior,
      Rect::new(Point::new(1, 1), Point::new(4, 4))
    );
    assert_eq!(interior.points().count(), 9);

    let tiny = Room::new(10, 10, 3, 3).interior().unwrap();
    assert_eq!(tiny.points().collect::<Vec<_>>(), vec![Point::new(11, 11)]);
  }

  #[test]
  fn degenerate_rooms_have_no_interior() {
    for &(w, h) in &[(2, 5), (5, 2), (0, 0), (-4, 6)] {
      let err = Room::new(3, 4, w, h).interior().unwrap_err();
      assert_eq!(
        err,
        Error::InvalidRoomDimensions {
          origin: Point::new(3, 4),
          width: w,
          height: h,
        }
      );
    }
  }

  #[test]
  fn add_room_walls_and_floor() {
    let mut map = GameMap::new(Rect::with_dims(10, 10));
    map.add_room(Room::new(1, 1, 4, 3));

    assert_eq!(map.tile(Point::new(1, 1)), Tile::Wall);
    assert_eq!(map.tile(Point::new(4, 3)), Tile::Wall);
    assert_eq!(map.tile(Point::new(2, 2)), Tile::Ground);
    assert_eq!(map.tile(Point::new(3, 2)), Tile::Ground);
    assert_eq!(map.tile(Point::new(5, 2)), Tile::Void);
    assert_eq!(map.tile(Point::new(-3, 2)), Tile::Void);
    assert_eq!(map.rooms(), &[Room::new(1, 1, 4, 3)]);
  }

  #[test]
  fn corridor_opens_wall() {
    let mut map = GameMap::new(Rect::with_dims(20, 10));
    map.add_room(Room::new(0, 0, 5, 5));
    map.add_horizontal(Point::new(2, 2), 8);

    assert!(map.is_walkable(Point::new(4, 2)));
    assert!(map.is_walkable(Point::new(10, 2)));
    assert_eq!(map.tile(Point::new(7, 1)), Tile::Wall);
  }

  #[test]
  fn carved_rooms_fit_and_do_not_overlap() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut map = GameMap::new(Rect::with_dims(80, 40));
    let rooms = map.rooms_and_corridors(&mut rng, 30, 4, 10).to_vec();

    assert!(!rooms.is_empty());
    for (i, a) in rooms.iter().enumerate() {
      assert!(a.width >= 4 && a.height >= 4);
      assert!(map.bounds().intersect(a.rect()) == Some(a.rect()));
      for b in &rooms[i + 1..] {
        assert_eq!(a.rect().intersect(b.rect()), None);
      }
    }
  }
}
