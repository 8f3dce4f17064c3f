//! Low-level terminal handle.
//!
//! All errors from the terminal will panic, since a terminal that can't be
//! written to is effectively unrecoverable.

use std::io;
use std::time::Duration;

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

use crate::gfx::texel;
use crate::gfx::texel::Texel;

enum Mode {
  /// Raw mode on a real TTY, in the alternate screen.
  Interactive,
  /// Escape sequences go to the writer, but the TTY is never touched.
  Headless { cols: u16, rows: u16 },
}

/// An exclusive handle on a terminal.
///
/// Creating an interactive `Terminal` switches the TTY into raw mode and the
/// alternate screen; dropping it puts everything back.
pub struct Terminal<W: io::Write = io::Stdout> {
  w: W,
  mode: Mode,
}

impl Terminal {
  /// Takes over the process's terminal.
  pub fn init() -> Terminal {
    Terminal::with(io::stdout())
  }
}

/// Arguments for a draw call.
///
/// See [`Terminal::draw()`].
#[allow(missing_docs)]
pub struct DrawCall {
  pub row: u16,
  pub col: u16,
  pub texel: Texel,
}

fn to_crossterm(color: texel::Color) -> crossterm::style::Color {
  match color {
    texel::Color::Rgb(rgb) => crossterm::style::Color::Rgb {
      r: rgb.red,
      g: rgb.green,
      b: rgb.blue,
    },
    texel::Color::Reset | texel::Color::Inherit => {
      crossterm::style::Color::Reset
    }
  }
}

fn is_close_request(e: &KeyEvent) -> bool {
  match e.code {
    KeyCode::Esc | KeyCode::Char('q') => true,
    KeyCode::Char('c') => e.modifiers.contains(KeyModifiers::CONTROL),
    _ => false,
  }
}

impl<W: io::Write> Terminal<W> {
  /// Takes over the TTY, sending output to `w`.
  pub fn with(mut w: W) -> Terminal<W> {
    crossterm::execute!(
      w,
      crossterm::terminal::EnterAlternateScreen,
      crossterm::cursor::Hide,
      crossterm::terminal::DisableLineWrap,
    )
    .unwrap();
    crossterm::terminal::enable_raw_mode().unwrap();

    Terminal {
      w,
      mode: Mode::Interactive,
    }
  }

  /// Creates a terminal of a fixed size that only writes to `w`.
  ///
  /// Nothing is read from or configured on the TTY, so this works without
  /// one.
  pub fn headless(w: W, cols: u16, rows: u16) -> Terminal<W> {
    Terminal {
      w,
      mode: Mode::Headless { cols, rows },
    }
  }

  /// Returns the current dimensions of the terminal, as `(cols, rows)`.
  pub fn dims(&self) -> (u16, u16) {
    match self.mode {
      Mode::Interactive => crossterm::terminal::size().unwrap(),
      Mode::Headless { cols, rows } => (cols, rows),
    }
  }

  /// Returns the writer this terminal draws to.
  pub fn writer(&self) -> &W {
    &self.w
  }

  /// Sets the window title.
  pub fn set_title(&mut self, title: &str) {
    crossterm::queue!(self.w, crossterm::terminal::SetTitle(title)).unwrap();
  }

  /// Clears the whole screen.
  pub fn clear(&mut self) {
    crossterm::queue!(
      self.w,
      crossterm::style::ResetColor,
      crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
    )
    .unwrap();
  }

  /// Queues a single cell to be drawn.
  pub fn draw(&mut self, call: DrawCall) {
    use crossterm::style::Colors;

    crossterm::queue!(
      self.w,
      crossterm::cursor::MoveTo(call.col, call.row),
      crossterm::style::SetColors(Colors {
        foreground: Some(to_crossterm(call.texel.fg())),
        background: Some(to_crossterm(call.texel.bg())),
      }),
      crossterm::style::Print(call.texel.glyph().unwrap_or(' ')),
    )
    .unwrap();
  }

  /// Flushes every queued command to the screen.
  pub fn flush(&mut self) {
    self.w.flush().unwrap();
  }

  /// Drains pending input, returning whether any of it asked to close the
  /// window (Esc, `q`, or Ctrl-C).
  ///
  /// Other key presses are discarded. Headless terminals never receive input.
  pub fn close_requested(&mut self) -> bool {
    if let Mode::Headless { .. } = self.mode {
      return false;
    }

    let mut requested = false;
    while crossterm::event::poll(Duration::default()).unwrap() {
      if let Event::Key(e) = crossterm::event::read().unwrap() {
        requested |= is_close_request(&e);
      }
    }
    requested
  }

  /// Clean up whatever mess the terminal made.
  fn cleanup(&mut self) {
    if let Mode::Interactive = self.mode {
      crossterm::execute!(
        self.w,
        crossterm::style::ResetColor,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show,
        crossterm::terminal::EnableLineWrap,
      )
      .unwrap();
      crossterm::terminal::disable_raw_mode().unwrap();
    }
    self.w.flush().unwrap();
  }
}

impl<W: io::Write> Drop for Terminal<W> {
  fn drop(&mut self) {
    self.cleanup();
  }
}
