//! Field-of-view data.

use std::collections::HashSet;

use crate::geo::Point;
use crate::geo::Rect;
use crate::map::GameMap;

/// What an observer can currently see, and what it has seen before.
///
/// Drawing consumes a `FovMap` but never computes one; visibility is filled in
/// from outside, either point by point or with [`FovMap::reveal_radius()`].
#[derive(Clone, Debug, Default)]
pub struct FovMap {
  visible: HashSet<Point>,
  explored: HashSet<Point>,
}

impl FovMap {
  /// Creates a new `FovMap` with nothing visible or explored.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns whether `p` is visible right now.
  pub fn is_visible(&self, p: Point) -> bool {
    self.visible.contains(&p)
  }

  /// Returns whether `p` has ever been visible.
  pub fn is_explored(&self, p: Point) -> bool {
    self.explored.contains(&p)
  }

  /// Marks `p` as visible (and therefore explored).
  pub fn mark_visible(&mut self, p: Point) {
    self.visible.insert(p);
    self.explored.insert(p);
  }

  /// Forgets the current visible set, keeping the explored set.
  pub fn clear_visible(&mut self) {
    self.visible.clear();
  }

  /// Replaces the visible set with every map cell within `radius` of
  /// `center`.
  ///
  /// Walls do not block sight here.
  pub fn reveal_radius(&mut self, map: &GameMap, center: Point, radius: i64) {
    self.clear_visible();
    let window = Rect::with_dims(2 * radius + 1, 2 * radius + 1)
      .centered_on(center);
    let window = match window.intersect(map.bounds()) {
      Some(w) => w,
      None => return,
    };
    for p in window.points() {
      if (p - center).norm_at_most(radius) {
        self.mark_visible(p);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn visible_implies_explored() {
    let mut fov = FovMap::new();
    fov.mark_visible(Point::new(2, 3));
    fov.clear_visible();

    assert!(!fov.is_visible(Point::new(2, 3)));
    assert!(fov.is_explored(Point::new(2, 3)));
  }

  #[test]
  fn reveal_radius_is_clipped_to_map() {
    let map = GameMap::new(Rect::with_dims(10, 10));
    let mut fov = FovMap::new();
    fov.reveal_radius(&map, Point::new(0, 0), 2);

    assert!(fov.is_visible(Point::new(0, 0)));
    assert!(fov.is_visible(Point::new(2, 0)));
    assert!(fov.is_visible(Point::new(1, 1)));
    assert!(!fov.is_visible(Point::new(2, 2)));
    assert!(!fov.is_visible(Point::new(-1, 0)));
  }

  #[test]
  fn reveal_radius_replaces_visible() {
    let map = GameMap::new(Rect::with_dims(20, 20));
    let mut fov = FovMap::new();
    fov.reveal_radius(&map, Point::new(3, 3), 1);
    fov.reveal_radius(&map, Point::new(15, 15), 1);

    assert!(!fov.is_visible(Point::new(3, 3)));
    assert!(fov.is_explored(Point::new(3, 3)));
    assert!(fov.is_visible(Point::new(15, 15)));
  }
}
