//! Geometry primitives: points, rectangles, and rectangular grids.
//!
//! Coordinates follow terminal conventions: x grows to the right, and y grows
//! downwards.

use std::mem;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Range;

use num::FromPrimitive;
use num::Signed;
use num::Zero;

mod impls;

/// A cell position, or an offset between two cells.
///
/// Points add and subtract componentwise, and divide by a scalar.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct Point<T = i64>([T; 2]);

impl<T> Point<T> {
  /// Makes a point at `(x, y)`.
  #[inline]
  pub fn new(x: T, y: T) -> Self {
    Self([x, y])
  }

  /// The origin.
  #[inline]
  pub fn zero() -> Self
  where
    T: Zero,
  {
    Zero::zero()
  }

  #[inline]
  pub fn x(self) -> T
  where
    T: Copy,
  {
    self.0[0]
  }

  #[inline]
  pub fn y(self) -> T
  where
    T: Copy,
  {
    self.0[1]
  }

  /// Splits two points into their componentwise minimum and maximum.
  #[inline]
  pub fn min_max(mut self, mut other: Self) -> (Self, Self)
  where
    T: PartialOrd,
  {
    for i in 0..2 {
      if self.0[i] > other.0[i] {
        mem::swap(&mut self.0[i], &mut other.0[i])
      }
    }
    (self, other)
  }

  /// Returns whether this point lies within distance `r` of the origin.
  pub fn norm_at_most(self, r: T) -> bool
  where
    T: Add<Output = T> + Mul<Output = T> + PartialOrd + Copy,
  {
    let [x, y] = self.0;
    x * x + y * y <= r * r
  }
}

/// An axis-aligned, half-open box of cells: `min` is inside it and `max` is
/// one past the last row and column.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Rect<T = i64>(Point<T>, Point<T>);

// min.x <= max.x && min.y <= max.y
impl<T: Signed> Rect<T> {
  /// Makes the box spanned by two opposite corners, in either order.
  #[inline]
  pub fn new(p1: Point<T>, p2: Point<T>) -> Self
  where
    T: PartialOrd,
  {
    let (min, max) = Point::min_max(p1, p2);
    Self(min, max)
  }

  /// Makes a `width` by `height` box starting at the origin.
  #[inline]
  pub fn with_dims(width: T, height: T) -> Self {
    Self(Point::zero(), Point::new(width.abs(), height.abs()))
  }

  /// The first cell, in row-major order.
  #[inline]
  pub fn upper_left(self) -> Point<T> {
    self.0
  }

  /// Returns `(min, max)`.
  #[inline]
  pub fn corners(self) -> (Point<T>, Point<T>) {
    (self.0, self.1)
  }

  #[inline]
  pub fn width(self) -> T
  where
    T: Copy,
  {
    self.1.x() - self.0.x()
  }

  #[inline]
  pub fn height(self) -> T
  where
    T: Copy,
  {
    self.1.y() - self.0.y()
  }

  /// Number of cells inside.
  #[inline]
  pub fn area(self) -> T
  where
    T: Copy,
  {
    self.width() * self.height()
  }

  #[inline]
  pub fn is_empty(self) -> bool
  where
    T: Copy,
  {
    !self.area().is_positive()
  }

  /// Returns the center of this `Rect`, rounding towards the upper-left.
  #[inline]
  pub fn center(self) -> Point<T>
  where
    T: Copy + FromPrimitive,
  {
    let two = T::from_u8(2).unwrap_or_else(T::one);
    self.0 + (self.1 - self.0) / two
  }

  #[inline]
  pub fn contains(self, p: Point<T>) -> bool
  where
    T: Copy + PartialOrd,
  {
    (self.0.x()..self.1.x()).contains(&p.x())
      && (self.0.y()..self.1.y()).contains(&p.y())
  }

  /// Moves this box, keeping its size, so that [`Rect::center()`] is
  /// `center`.
  pub fn centered_on(self, center: Point<T>) -> Self
  where
    T: FromPrimitive + Copy,
  {
    let half = (self.1 - self.0) / T::from_u8(2).unwrap_or_else(T::one);
    Self::with_dims(self.width(), self.height()) + (center - half)
  }

  /// The cells shared by both boxes, or `None` if there are none.
  pub fn intersect(self, other: Rect<T>) -> Option<Rect<T>>
  where
    T: PartialOrd + Copy,
  {
    let (_, min) = Point::min_max(self.0, other.0);
    let (max, _) = Point::min_max(self.1, other.1);
    let overlap = Rect(min, max);
    if min.x() < max.x() && min.y() < max.y() {
      Some(overlap)
    } else {
      None
    }
  }

  /// Every cell inside, row by row.
  pub fn points(self) -> impl Iterator<Item = Point<T>>
  where
    T: Copy,
    Range<T>: Iterator<Item = T>,
  {
    let (min, max) = (self.0, self.1);
    (min.y()..max.y())
      .flat_map(move |y| (min.x()..max.x()).map(move |x| Point::new(x, y)))
  }
}

/// A value for every cell of a [`Rect`], stored row-major.
// self.1.len() == self.0.area()
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct RectVec<T>(Rect<i64>, Box<[T]>);

impl<T: Clone> RectVec<T> {
  /// A grid with no cells.
  pub fn empty() -> Self {
    RectVec(Rect::with_dims(0, 0), Box::new([]))
  }

  /// A grid over `rect` with every cell set to `val`.
  pub fn new(rect: Rect<i64>, val: T) -> Self {
    let len = rect.area() as usize;
    RectVec(rect, vec![val; len].into_boxed_slice())
  }

  /// The box this grid covers.
  pub fn dims(&self) -> Rect<i64> {
    self.0
  }

  /// The cells in row-major order.
  pub fn data(&self) -> &[T] {
    &self.1
  }

  /// Overwrites every value with `val`.
  pub fn fill(&mut self, val: T) {
    self.1.iter_mut().for_each(|cell| *cell = val.clone());
  }

  /// Re-targets this grid at `rect` and resets every cell to `val`.
  pub fn resize(&mut self, rect: Rect<i64>, val: T) {
    if self.1.len() != rect.area() as usize {
      *self = Self::new(rect, val);
      return;
    }
    self.0 = rect;
    self.fill(val);
  }

  fn index_of(&self, p: Point<i64>) -> Option<usize> {
    if !self.0.contains(p) {
      return None;
    }
    let rel = p - self.0.upper_left();
    Some((rel.x() + rel.y() * self.0.width()) as usize)
  }

  /// The cell at `p`, if `p` is inside the grid.
  pub fn get(&self, p: Point<i64>) -> Option<&T> {
    let index = self.index_of(p)?;
    self.1.get(index)
  }

  /// Mutable access to the cell at `p`, if `p` is inside the grid.
  pub fn get_mut(&mut self, p: Point<i64>) -> Option<&mut T> {
    let index = self.index_of(p)?;
    self.1.get_mut(index)
  }

  /// Every cell alongside its position, row by row.
  pub fn points(&self) -> impl Iterator<Item = (Point<i64>, &T)> + '_ {
    self.0.points().zip(self.1.iter())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rect_is_half_open() {
    let r = Rect::new(Point::new(1, 1), Point::new(4, 3));
    assert!(r.contains(Point::new(1, 1)));
    assert!(r.contains(Point::new(3, 2)));
    assert!(!r.contains(Point::new(4, 2)));
    assert!(!r.contains(Point::new(3, 3)));
    assert_eq!(r.area(), 6);
    assert_eq!(r.points().count(), 6);
  }

  #[test]
  fn rect_new_sorts_corners() {
    let r = Rect::new(Point::new(5, 0), Point::new(2, 7));
    assert_eq!(r.corners(), (Point::new(2, 0), Point::new(5, 7)));
  }

  #[test]
  fn intersect_disjoint_is_none() {
    let a = Rect::new(Point::new(0, 0), Point::new(3, 3));
    let b = Rect::new(Point::new(3, 0), Point::new(6, 3));
    assert_eq!(a.intersect(b), None);

    let c = Rect::new(Point::new(2, 2), Point::new(6, 6));
    assert_eq!(
      a.intersect(c),
      Some(Rect::new(Point::new(2, 2), Point::new(3, 3)))
    );
  }

  #[test]
  fn centered_on_keeps_dims() {
    let r = Rect::with_dims(10, 4).centered_on(Point::new(20, 20));
    assert_eq!(r.width(), 10);
    assert_eq!(r.height(), 4);
    assert_eq!(r.upper_left(), Point::new(15, 18));
    assert_eq!(r.center(), Point::new(20, 20));
  }

  #[test]
  fn rect_vec_indexing() {
    let rect = Rect::new(Point::new(-2, -2), Point::new(2, 1));
    let mut grid = RectVec::new(rect, 0u8);
    *grid.get_mut(Point::new(1, 0)).unwrap() = 7;

    assert_eq!(grid.get(Point::new(1, 0)), Some(&7));
    assert_eq!(grid.get(Point::new(2, 0)), None);
    assert_eq!(grid.points().filter(|(_, v)| **v == 7).count(), 1);
    assert_eq!(
      grid.points().find(|(_, v)| **v == 7).map(|(p, _)| p),
      Some(Point::new(1, 0))
    );
  }

  #[test]
  fn norm_at_most() {
    assert!(Point::new(3, 4).norm_at_most(5));
    assert!(!Point::new(3, 4).norm_at_most(4));
  }
}
