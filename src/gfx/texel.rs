//! Texels, terminal elements.
//!
//! A *texel* is one cell of a console surface: a glyph plus foreground and
//! background colors. Either color may be left to the terminal default, or
//! inherited from whatever lies below when layers are composited.

pub use palette::named as colors;

/// An RGB value used by a [`Texel`].
pub type Rgb = palette::Srgb<u8>;

/// A foreground or background color for a [`Texel`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Color {
  /// A solid RGB value.
  Rgb(Rgb),

  /// The terminal's default color.
  Reset,

  /// Whatever color the surface below had; if there is nothing below, behaves
  /// like `Reset`.
  Inherit,
}

impl From<Rgb> for Color {
  fn from(rgb: Rgb) -> Self {
    Self::Rgb(rgb)
  }
}

bitflags::bitflags! {
  struct Meta: u8 {
    const FG_RESET = 1 << 0;
    const FG_INHERIT = 1 << 1;
    const BG_RESET = 1 << 2;
    const BG_INHERIT = 1 << 3;
  }
}

/// One console cell.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Texel {
  glyph: Option<char>,
  fg: Rgb,
  bg: Rgb,
  meta: Meta,
}

impl Texel {
  /// Creates a fully transparent texel.
  ///
  /// Layering an empty texel over another leaves the other one unchanged.
  #[inline]
  pub fn empty() -> Self {
    Self {
      glyph: None,
      fg: colors::BLACK,
      bg: colors::BLACK,
      meta: Meta::FG_INHERIT | Meta::BG_INHERIT,
    }
  }

  /// Creates a texel with the given glyph and default colors.
  #[inline]
  pub fn new(glyph: char) -> Self {
    Self {
      glyph: Some(glyph),
      fg: colors::BLACK,
      bg: colors::BLACK,
      meta: Meta::FG_RESET | Meta::BG_RESET,
    }
  }

  /// Returns this texel's glyph, if it has one.
  #[inline]
  pub fn glyph(self) -> Option<char> {
    self.glyph
  }

  /// Returns this texel's foreground color.
  #[inline]
  pub fn fg(self) -> Color {
    self.color(self.fg, Meta::FG_RESET, Meta::FG_INHERIT)
  }

  /// Returns a copy of this texel with the given foreground color.
  #[inline]
  pub fn with_fg(mut self, color: impl Into<Color>) -> Self {
    let flags = (Meta::FG_RESET, Meta::FG_INHERIT);
    if let Some(rgb) = self.set_color(color.into(), flags) {
      self.fg = rgb;
    }
    self
  }

  /// Returns this texel's background color.
  #[inline]
  pub fn bg(self) -> Color {
    self.color(self.bg, Meta::BG_RESET, Meta::BG_INHERIT)
  }

  /// Returns a copy of this texel with the given background color.
  #[inline]
  pub fn with_bg(mut self, color: impl Into<Color>) -> Self {
    let flags = (Meta::BG_RESET, Meta::BG_INHERIT);
    if let Some(rgb) = self.set_color(color.into(), flags) {
      self.bg = rgb;
    }
    self
  }

  fn color(self, rgb: Rgb, reset: Meta, inherit: Meta) -> Color {
    match (self.meta.contains(reset), self.meta.contains(inherit)) {
      (true, _) => Color::Reset,
      (_, true) => Color::Inherit,
      _ => Color::Rgb(rgb),
    }
  }

  // Updates the flags for one channel; returns the RGB value to store, if any.
  fn set_color(
    &mut self,
    color: Color,
    (reset, inherit): (Meta, Meta),
  ) -> Option<Rgb> {
    self.meta.remove(reset | inherit);
    match color {
      Color::Rgb(rgb) => return Some(rgb),
      Color::Reset => self.meta |= reset,
      Color::Inherit => self.meta |= inherit,
    }
    None
  }

  /// Layers `other` over this texel, following the inheritance rules above.
  #[inline]
  pub fn add_layer(mut self, other: Texel) -> Self {
    self.glyph = other.glyph.or(self.glyph);
    match other.fg() {
      Color::Inherit => {}
      fg => self = self.with_fg(fg),
    }
    match other.bg() {
      Color::Inherit => {}
      bg => self = self.with_bg(bg),
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_layer_is_transparent() {
    let base = Texel::new('#').with_fg(colors::RED);
    assert_eq!(base.add_layer(Texel::empty()), base);
  }

  #[test]
  fn layer_overrides_glyph_and_keeps_inherited_bg() {
    let base = Texel::new('.').with_bg(colors::NAVY);
    let top = Texel::new('g').with_fg(colors::GREEN).with_bg(Color::Inherit);
    let out = base.add_layer(top);

    assert_eq!(out.glyph(), Some('g'));
    assert_eq!(out.fg(), Color::Rgb(colors::GREEN));
    assert_eq!(out.bg(), Color::Rgb(colors::NAVY));
  }

  #[test]
  fn reset_is_not_inherit() {
    let base = Texel::new('.').with_fg(colors::RED);
    let out = base.add_layer(Texel::new('x'));
    assert_eq!(out.fg(), Color::Reset);
  }
}
