//! Offscreen layers.

use crate::entity::Entity;
use crate::geo::Point;
use crate::geo::Rect;
use crate::geo::RectVec;
use crate::gfx::console::ConsoleSize;
use crate::gfx::texel::colors;
use crate::gfx::texel::Color;
use crate::gfx::texel::Rgb;
use crate::gfx::texel::Texel;
use crate::map::FovMap;
use crate::map::GameMap;
use crate::map::Tile;

/// The size of a [`Layer`], in cells.
pub type LayerSize = ConsoleSize;

/// An offscreen surface that is drawn into and then blitted onto a
/// [`RootConsole`](crate::gfx::RootConsole).
///
/// A layer's cells are addressed in its own coordinates, starting at the
/// origin; `position` is where that origin lands on the root console.
#[derive(Clone, Debug)]
pub struct Layer {
  surface: RectVec<Texel>,
  position: Point,
}

impl Layer {
  /// Creates a new, fully transparent `Layer`.
  pub fn new(size: LayerSize, position: Point) -> Self {
    Self {
      surface: RectVec::new(size.rect(), Texel::empty()),
      position,
    }
  }

  /// Returns the size of this layer.
  pub fn size(&self) -> LayerSize {
    ConsoleSize::of(self.surface.dims())
  }

  /// Returns where this layer's origin lands on the root console.
  pub fn position(&self) -> Point {
    self.position
  }

  /// Moves this layer to a new position on the root console.
  pub fn set_position(&mut self, position: Point) {
    self.position = position;
  }

  /// Makes every cell transparent again.
  pub fn clear(&mut self) {
    self.surface.fill(Texel::empty());
  }

  /// Returns the texel at `p`, in layer coordinates.
  pub fn get(&self, p: Point) -> Option<Texel> {
    self.surface.get(p).copied()
  }

  /// Layers `texel` over whatever is at `p`; points outside the layer are
  /// ignored.
  pub fn put(&mut self, p: Point, texel: Texel) {
    if let Some(slot) = self.surface.get_mut(p) {
      *slot = slot.add_layer(texel);
    }
  }

  /// Writes `text` in a single row starting at `p`, clipped to the layer.
  pub fn print(&mut self, p: Point, text: &str, fg: Rgb) {
    for (i, c) in text.chars().enumerate() {
      let texel = Texel::new(c).with_fg(fg);
      self.put(p + Point::new(i as i64, 0), texel);
    }
  }

  /// Draws `item` onto this layer, showing only what `fov` allows.
  pub fn draw<D: Drawable + ?Sized>(&mut self, item: &D, fov: &FovMap) {
    item.draw_onto(self, fov);
  }

  pub(in crate::gfx) fn cells(
    &self,
  ) -> impl Iterator<Item = (Point, &Texel)> + '_ {
    self.surface.points()
  }

  pub(in crate::gfx) fn rect(&self) -> Rect {
    self.surface.dims()
  }
}

/// Something that can be drawn onto a [`Layer`].
pub trait Drawable {
  /// Draws `self` onto `layer`, showing only what `fov` allows.
  fn draw_onto(&self, layer: &mut Layer, fov: &FovMap);
}

/// Entities are only drawn where they can currently be seen.
impl Drawable for [Entity] {
  fn draw_onto(&self, layer: &mut Layer, fov: &FovMap) {
    for e in self {
      if !fov.is_visible(e.pos) {
        continue;
      }
      let face = e.face();
      let texel = Texel::new(face.glyph)
        .with_fg(face.color)
        .with_bg(Color::Inherit);
      layer.put(e.pos, texel);
    }
  }
}

impl Drawable for Vec<Entity> {
  fn draw_onto(&self, layer: &mut Layer, fov: &FovMap) {
    self.as_slice().draw_onto(layer, fov)
  }
}

/// Visible cells are drawn lit, explored ones dimmed, and the rest not at
/// all.
impl Drawable for GameMap {
  fn draw_onto(&self, layer: &mut Layer, fov: &FovMap) {
    for (p, tile) in self.tiles() {
      let (glyph, lit, dim) = match tile {
        Tile::Void => continue,
        Tile::Wall => ('#', colors::GOLDENROD, colors::DIMGRAY),
        Tile::Ground => ('.', colors::WHEAT, colors::DARKSLATEGRAY),
      };

      let fg = if fov.is_visible(p) {
        lit
      } else if fov.is_explored(p) {
        dim
      } else {
        continue;
      };
      layer.put(p, Texel::new(glyph).with_fg(fg));
    }
  }
}
