//! Enemy placement.
//!
//! Enemies are scattered over room interiors by rejection sampling: pick a
//! uniformly random interior cell, and keep it only if no enemy placed so far
//! (in any room) already stands there.

use rand::distributions::Bernoulli;
use rand::distributions::Distribution as _;
use rand::distributions::Uniform;
use rand::Rng;

use crate::entity::Entity;
use crate::entity::EntityType;
use crate::error::Error;
use crate::error::Result;
use crate::geo::Point;
use crate::map::Room;

/// The most enemies a single room receives by default.
pub const MAX_ENEMIES_PER_ROOM: usize = 5;

/// The default chance that a placed enemy is an ogre rather than a goblin.
pub const OGRE_CHANCE: f64 = 0.2;

/// How a candidate cell is compared against already-placed enemies.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Collision {
  /// Two enemies collide when both coordinates match.
  Exact,

  /// The older comparison, which tests the candidate's x coordinate against
  /// both coordinates of each placed enemy. It misses most real collisions
  /// and reports phantom ones on the diagonal; kept only for comparison.
  Legacy,
}

impl Collision {
  /// Returns whether a candidate at `candidate` is blocked by `placed`.
  #[inline]
  pub fn collides(self, candidate: Point, placed: Point) -> bool {
    match self {
      Collision::Exact => candidate == placed,
      Collision::Legacy => {
        candidate.x() == placed.x() && candidate.x() == placed.y()
      }
    }
  }
}

/// Tunables for enemy placement.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpawnConfig {
  /// Fewest enemies a room may receive.
  pub min_per_room: usize,
  /// Most enemies a room may receive.
  pub max_per_room: usize,
  /// Chance in `[0, 1]` that an enemy is an ogre; goblin otherwise.
  pub ogre_chance: f64,
  pub collision: Collision,
}

impl Default for SpawnConfig {
  fn default() -> Self {
    Self {
      min_per_room: 0,
      max_per_room: MAX_ENEMIES_PER_ROOM,
      ogre_chance: OGRE_CHANCE,
      collision: Collision::Exact,
    }
  }
}

impl SpawnConfig {
  /// Returns a config that puts exactly `count` enemies in every room (space
  /// permitting).
  pub fn exactly(count: usize) -> Self {
    Self {
      min_per_room: count,
      max_per_room: count,
      ..Self::default()
    }
  }

  fn type_coin(&self) -> Result<Bernoulli> {
    Bernoulli::new(self.ogre_chance).map_err(|_| {
      Error::InvalidSpawnConfig(format!(
        "ogre chance {} is outside [0, 1]",
        self.ogre_chance
      ))
    })
  }

  fn counts(&self) -> Result<Uniform<usize>> {
    if self.min_per_room > self.max_per_room {
      return Err(Error::InvalidSpawnConfig(format!(
        "min_per_room ({}) exceeds max_per_room ({})",
        self.min_per_room, self.max_per_room
      )));
    }
    Ok(Uniform::new_inclusive(self.min_per_room, self.max_per_room))
  }
}

/// Generates enemies for `rooms` with the default [`SpawnConfig`].
///
/// See [`generate_enemies_with()`].
pub fn generate_enemies<R: Rng + ?Sized>(
  rooms: &[Room],
  rng: &mut R,
) -> Result<Vec<Entity>> {
  generate_enemies_with(rooms, rng, &SpawnConfig::default())
}

/// Generates enemies for `rooms`.
///
/// Each room gets a uniformly random number of enemies in
/// `config.min_per_room..=config.max_per_room`, placed at distinct interior
/// cells. Every room is validated before anything is sampled, so a single
/// room without an interior fails the whole call.
pub fn generate_enemies_with<R: Rng + ?Sized>(
  rooms: &[Room],
  rng: &mut R,
  config: &SpawnConfig,
) -> Result<Vec<Entity>> {
  for room in rooms {
    room.interior()?;
  }
  let counts = config.counts()?;
  config.type_coin()?;

  let mut enemies = Vec::new();
  for room in rooms {
    let count = counts.sample(rng);
    place_in_room(*room, count, &mut enemies, rng, config)?;
  }
  Ok(enemies)
}

/// Places up to `count` enemies inside `room`, appending them to `enemies`.
///
/// Candidates are checked against everything already in `enemies`. Placement
/// stops early once every interior cell is blocked, so sampling always
/// terminates. Returns the number placed.
pub fn place_in_room<R: Rng + ?Sized>(
  room: Room,
  count: usize,
  enemies: &mut Vec<Entity>,
  rng: &mut R,
  config: &SpawnConfig,
) -> Result<usize> {
  let interior = room.interior()?;
  let coin = config.type_coin()?;

  let blocked = |p: Point, enemies: &[Entity]| {
    enemies.iter().any(|e| config.collision.collides(p, e.pos))
  };

  let (ul, lr) = interior.corners();
  let xs = Uniform::new(ul.x(), lr.x());
  let ys = Uniform::new(ul.y(), lr.y());

  let mut placed = 0;
  while placed < count {
    if interior.points().all(|p| blocked(p, &enemies[..])) {
      break;
    }

    let p = loop {
      let p = Point::new(xs.sample(rng), ys.sample(rng));
      if !blocked(p, &enemies[..]) {
        break p;
      }
    };

    let kind = if coin.sample(rng) {
      EntityType::Ogre
    } else {
      EntityType::Goblin
    };
    enemies.push(Entity::new(p, kind));
    placed += 1;
  }

  Ok(placed)
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use proptest::prelude::*;
  use rand::SeedableRng as _;
  use rand_chacha::ChaCha8Rng;

  use super::*;

  fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
  }

  fn assert_distinct(enemies: &[Entity]) {
    let cells = enemies.iter().map(|e| e.pos).collect::<HashSet<_>>();
    assert_eq!(cells.len(), enemies.len(), "overlap in {:?}", enemies);
  }

  #[test]
  fn five_in_a_five_by_five() {
    let room = Room::new(0, 0, 5, 5);
    let enemies =
      generate_enemies_with(&[room], &mut rng(1), &SpawnConfig::exactly(5))
        .unwrap();

    assert_eq!(enemies.len(), 5);
    assert_distinct(&enemies);
    for e in &enemies {
      assert!((1..=3).contains(&e.pos.x()), "{:?}", e);
      assert!((1..=3).contains(&e.pos.y()), "{:?}", e);
      assert_ne!(e.kind, EntityType::Player);
    }
  }

  #[test]
  fn legacy_comparison_misses_real_collision() {
    let placed = Point::new(2, 3);
    assert!(Collision::Exact.collides(Point::new(2, 3), placed));
    assert!(!Collision::Legacy.collides(Point::new(2, 3), placed));

    // And reports one that isn't there.
    assert!(Collision::Legacy.collides(Point::new(3, 1), Point::new(3, 3)));
    assert!(!Collision::Exact.collides(Point::new(3, 1), Point::new(3, 3)));
  }

  #[test]
  fn legacy_comparison_allows_stacking() {
    // A 3x4 room has a two-cell interior at (1, 1) and (1, 2). Under the
    // legacy check, (1, 2) never blocks anything, so a fixed seed eventually
    // stacks enemies; the exact check never does.
    let room = Room::new(0, 0, 3, 4);
    let legacy = SpawnConfig {
      collision: Collision::Legacy,
      ..SpawnConfig::exactly(2)
    };
    let stacked = (0..64).any(|seed| {
      let mut enemies = vec![Entity::new(Point::new(1, 2), EntityType::Goblin)];
      place_in_room(room, 2, &mut enemies, &mut rng(seed), &legacy).unwrap();
      enemies.iter().filter(|e| e.pos == Point::new(1, 2)).count() > 1
    });
    assert!(stacked);

    for seed in 0..64 {
      let mut enemies = vec![Entity::new(Point::new(1, 2), EntityType::Goblin)];
      let placed = place_in_room(
        room,
        2,
        &mut enemies,
        &mut rng(seed),
        &SpawnConfig::exactly(2),
      )
      .unwrap();
      assert_eq!(placed, 1);
      assert_distinct(&enemies);
    }
  }

  #[test]
  fn collisions_span_rooms() {
    // Two copies of the same 3x3 room share their single interior cell.
    let room = Room::new(4, 4, 3, 3);
    let enemies = generate_enemies_with(
      &[room, room],
      &mut rng(9),
      &SpawnConfig::exactly(1),
    )
    .unwrap();
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].pos, Point::new(5, 5));
  }

  #[test]
  fn overfull_room_is_clamped() {
    let room = Room::new(0, 0, 3, 3);
    let mut enemies = Vec::new();
    let placed =
      place_in_room(room, 5, &mut enemies, &mut rng(3), &SpawnConfig::default())
        .unwrap();
    assert_eq!(placed, 1);
    assert_eq!(enemies.len(), 1);
  }

  #[test]
  fn degenerate_room_fails_before_sampling() {
    let rooms = [Room::new(0, 0, 6, 6), Room::new(10, 10, 2, 8)];
    let err = generate_enemies(&rooms, &mut rng(0)).unwrap_err();
    assert_eq!(
      err,
      Error::InvalidRoomDimensions {
        origin: Point::new(10, 10),
        width: 2,
        height: 8,
      }
    );
  }

  #[test]
  fn bad_configs_are_rejected() {
    let room = [Room::new(0, 0, 5, 5)];
    let inverted = SpawnConfig {
      min_per_room: 4,
      max_per_room: 2,
      ..SpawnConfig::default()
    };
    assert!(matches!(
      generate_enemies_with(&room, &mut rng(0), &inverted),
      Err(Error::InvalidSpawnConfig(_))
    ));

    let chance = SpawnConfig {
      ogre_chance: 1.5,
      ..SpawnConfig::default()
    };
    assert!(matches!(
      generate_enemies_with(&room, &mut rng(0), &chance),
      Err(Error::InvalidSpawnConfig(_))
    ));
  }

  #[test]
  fn no_rooms_no_enemies() {
    assert!(generate_enemies(&[], &mut rng(0)).unwrap().is_empty());
  }

  #[test]
  fn type_split_is_mostly_goblins() {
    let rooms = (0..10_000)
      .map(|i| Room::new(i * 4, 0, 3, 3))
      .collect::<Vec<_>>();
    let enemies =
      generate_enemies_with(&rooms, &mut rng(42), &SpawnConfig::exactly(1))
        .unwrap();
    assert_eq!(enemies.len(), 10_000);

    let goblins =
      enemies.iter().filter(|e| e.kind == EntityType::Goblin).count();
    let share = goblins as f64 / enemies.len() as f64;
    // Five standard deviations of a 10,000-trial binomial at p = 0.8.
    assert!((share - 0.8).abs() < 0.02, "goblin share was {}", share);
  }

  #[test]
  fn same_seed_same_enemies() {
    let rooms = [Room::new(0, 0, 8, 6), Room::new(20, 3, 10, 10)];
    let a = generate_enemies(&rooms, &mut rng(77)).unwrap();
    let b = generate_enemies(&rooms, &mut rng(77)).unwrap();
    assert_eq!(a, b);
  }

  proptest! {
    #[test]
    fn enemies_stay_inside_their_rooms(
      seed in any::<u64>(),
      shapes in prop::collection::vec((0i64..40, 3i64..12, 3i64..12), 1..8),
    ) {
      // Lay rooms out side by side so each enemy can be traced to one room.
      let rooms = shapes
        .iter()
        .enumerate()
        .map(|(i, &(y, w, h))| Room::new(i as i64 * 20, y, w, h))
        .collect::<Vec<_>>();
      let enemies = generate_enemies(&rooms, &mut rng(seed)).unwrap();

      let cells = enemies.iter().map(|e| e.pos).collect::<HashSet<_>>();
      prop_assert_eq!(cells.len(), enemies.len());

      for room in &rooms {
        let interior = room.interior().unwrap();
        let inside = enemies
          .iter()
          .filter(|e| room.rect().contains(e.pos))
          .collect::<Vec<_>>();
        prop_assert!(inside.len() <= MAX_ENEMIES_PER_ROOM);
        for e in inside {
          prop_assert!(interior.contains(e.pos));
        }
      }
      for e in &enemies {
        prop_assert!(rooms.iter().any(|r| r.rect().contains(e.pos)));
      }
    }
  }
}
