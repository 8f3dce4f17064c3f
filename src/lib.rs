//! A terminal roguelike fragment: a layered console renderer and enemy
//! placement for pre-carved dungeon rooms.
//!
//! ```
//! use delve::map::Room;
//! use delve::spawn;
//! use rand::SeedableRng as _;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let rooms = [Room::new(0, 0, 8, 6), Room::new(12, 2, 5, 5)];
//! let enemies = spawn::generate_enemies(&rooms, &mut rng).unwrap();
//! assert!(enemies.len() <= 2 * spawn::MAX_ENEMIES_PER_ROOM);
//! ```

pub mod entity;
pub mod error;
pub mod geo;
pub mod gfx;
pub mod map;
pub mod spawn;
pub mod timing;

pub use error::Error;
pub use error::Result;
