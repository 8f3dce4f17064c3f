//! The root console.

use std::io;
use std::mem;
use std::path::Path;
use std::path::PathBuf;

use crate::geo::Rect;
use crate::geo::RectVec;
use crate::gfx::layer::Layer;
use crate::gfx::terminal::DrawCall;
use crate::gfx::terminal::Terminal;
use crate::gfx::texel::Texel;

/// The size of a console surface, in cells.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ConsoleSize {
  pub width: u16,
  pub height: u16,
}

impl ConsoleSize {
  /// Returns a rectangle of this size with its upper-left corner at the
  /// origin.
  pub fn rect(self) -> Rect {
    Rect::with_dims(self.width as i64, self.height as i64)
  }

  pub(in crate::gfx) fn of(rect: Rect) -> Self {
    Self {
      width: rect.width() as u16,
      height: rect.height() as u16,
    }
  }
}

/// The window everything is eventually shown in.
///
/// Layers are composited onto the root with [`RootConsole::blit()`]; the
/// result reaches the screen on [`RootConsole::present()`], which only
/// rewrites the cells that changed since the previous frame.
pub struct RootConsole<W: io::Write = io::Stdout> {
  term: Terminal<W>,
  title: String,
  size: ConsoleSize,
  font_path: Option<PathBuf>,
  fullscreen: bool,
  closed: bool,

  // The frame being composited, and the frame currently on screen.
  back: RectVec<Texel>,
  front: RectVec<Texel>,
}

impl RootConsole {
  /// Opens a root console on the process's terminal.
  ///
  /// Terminals render with their own font, so `font_path` is only recorded.
  pub fn new(
    title: &str,
    size: ConsoleSize,
    font_path: Option<&Path>,
  ) -> RootConsole {
    RootConsole::with_terminal(Terminal::init(), title, size, font_path)
  }
}

impl<W: io::Write> RootConsole<W> {
  /// Opens a root console on an existing terminal handle.
  pub fn with_terminal(
    mut term: Terminal<W>,
    title: &str,
    size: ConsoleSize,
    font_path: Option<&Path>,
  ) -> RootConsole<W> {
    term.set_title(title);
    term.clear();
    RootConsole {
      term,
      title: title.to_string(),
      size,
      font_path: font_path.map(Path::to_path_buf),
      fullscreen: false,
      closed: false,
      back: RectVec::new(size.rect(), Texel::empty()),
      front: RectVec::empty(),
    }
  }

  /// Returns the window title.
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Returns the font this console was asked to use, if any.
  pub fn font_path(&self) -> Option<&Path> {
    self.font_path.as_deref()
  }

  /// Returns the current size of the root surface.
  pub fn size(&self) -> ConsoleSize {
    ConsoleSize::of(self.back.dims())
  }

  /// Returns the terminal this console draws to.
  pub fn terminal(&self) -> &Terminal<W> {
    &self.term
  }

  /// Returns whether the console is covering the whole terminal.
  pub fn is_fullscreen(&self) -> bool {
    self.fullscreen
  }

  /// Returns whether a request to close the window has been seen.
  ///
  /// Requests are picked up by [`RootConsole::poll_events()`].
  pub fn is_window_closed(&self) -> bool {
    self.closed
  }

  /// Checks the terminal for a close request.
  pub fn poll_events(&mut self) {
    if self.term.close_requested() {
      self.closed = true;
    }
  }

  /// Flips between the requested size and the full terminal.
  ///
  /// Whatever was composited so far this frame is discarded, and the next
  /// [`RootConsole::present()`] redraws every cell.
  pub fn toggle_fullscreen(&mut self) {
    self.fullscreen = !self.fullscreen;
    let size = if self.fullscreen {
      let (width, height) = self.term.dims();
      ConsoleSize { width, height }
    } else {
      self.size
    };

    self.back.resize(size.rect(), Texel::empty());
    self.front = RectVec::empty();
    self.term.clear();
  }

  /// Composites `layer` over the root at the layer's position.
  ///
  /// Parts of the layer that fall outside the root are dropped.
  pub fn blit(&mut self, layer: &Layer) {
    let offset = layer.position();
    if (layer.rect() + offset).intersect(self.back.dims()).is_none() {
      return;
    }

    for (p, texel) in layer.cells() {
      if let Some(slot) = self.back.get_mut(p + offset) {
        *slot = slot.add_layer(*texel);
      }
    }
  }

  /// Sends the composited frame to the screen and starts a fresh one.
  ///
  /// Returns the number of cells that were redrawn.
  pub fn present(&mut self) -> usize {
    let full_redraw = self.front.dims() != self.back.dims();
    let mut drawn = 0;
    for (i, (p, texel)) in self.back.points().enumerate() {
      if !full_redraw && self.front.data()[i] == *texel {
        continue;
      }
      self.term.draw(DrawCall {
        row: p.y() as u16,
        col: p.x() as u16,
        texel: *texel,
      });
      drawn += 1;
    }
    self.term.flush();

    mem::swap(&mut self.back, &mut self.front);
    self.back.resize(self.front.dims(), Texel::empty());
    drawn
  }
}
