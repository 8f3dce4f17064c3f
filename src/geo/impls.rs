//! Arithmetic on points and boxes.

use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Sub;

use num::Zero;

use crate::geo::Point;
use crate::geo::Rect;

impl<T> From<(T, T)> for Point<T> {
  #[inline]
  fn from((x, y): (T, T)) -> Self {
    Self::new(x, y)
  }
}

impl<T: Zero + Add<T, Output = T>> Zero for Point<T> {
  #[inline]
  fn zero() -> Self {
    Self([T::zero(), T::zero()])
  }

  #[inline]
  fn is_zero(&self) -> bool {
    self.0.iter().all(Zero::is_zero)
  }
}

impl<T: Add<U>, U> Add<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn add(self, other: Point<U>) -> Self::Output {
    let [x1, y1] = self.0;
    let [x2, y2] = other.0;
    Point([x1 + x2, y1 + y2])
  }
}

impl<T: Sub<U>, U> Sub<Point<U>> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn sub(self, other: Point<U>) -> Self::Output {
    let [x1, y1] = self.0;
    let [x2, y2] = other.0;
    Point([x1 - x2, y1 - y2])
  }
}

impl<T: Div<U>, U: Copy> Div<U> for Point<T> {
  type Output = Point<T::Output>;
  #[inline]
  fn div(self, other: U) -> Self::Output {
    let [x, y] = self.0;
    Point([x / other, y / other])
  }
}

impl<T: AddAssign<U>, U> AddAssign<Point<U>> for Point<T> {
  #[inline]
  fn add_assign(&mut self, other: Point<U>) {
    let [x, y] = other.0;
    self.0[0] += x;
    self.0[1] += y;
  }
}

impl<T: Add<U>, U: Copy> Add<Point<U>> for Rect<T> {
  type Output = Rect<T::Output>;
  #[inline]
  fn add(self, other: Point<U>) -> Self::Output {
    Rect(self.0 + other, self.1 + other)
  }
}
