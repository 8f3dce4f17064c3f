//! Timing primitives.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use chashmap::CHashMap;

/// A timer for keeping a steady frame rate.
pub struct FrameTimer {
  frame_count: u64,
  last_frame: Instant,

  fps: f64,
  last_measurement: Instant,
  last_measurement_frame: u64,
}

impl FrameTimer {
  /// Creates a new `FrameTimer`.
  pub fn new() -> FrameTimer {
    FrameTimer {
      frame_count: 0,
      last_frame: Instant::now(),
      fps: 0.0,
      last_measurement: Instant::now(),
      last_measurement_frame: 0,
    }
  }

  /// Returns the number of frames finished so far.
  pub fn frame_count(&self) -> u64 {
    self.frame_count
  }

  /// Returns the frame rate, re-measured at most once per `interval`.
  pub fn measure_fps(&mut self, interval: Duration) -> f64 {
    let elapsed = self.last_measurement.elapsed();
    if elapsed < interval {
      return self.fps;
    }

    let frames = (self.frame_count - self.last_measurement_frame) as f64;
    self.fps = frames / elapsed.as_secs_f64();
    self.last_measurement = Instant::now();
    self.last_measurement_frame = self.frame_count;
    self.fps
  }

  /// Ends a frame, sleeping off whatever is left of a `1 / target_fps`
  /// second frame.
  pub fn end_frame(&mut self, target_fps: u32) {
    let frame_time = Duration::from_secs(1) / target_fps.max(1);
    if let Some(left) = frame_time.checked_sub(self.last_frame.elapsed()) {
      thread::sleep(left);
    }
    self.last_frame = Instant::now();
    self.frame_count += 1;
  }
}

impl Default for FrameTimer {
  fn default() -> Self {
    Self::new()
  }
}

/// Running totals for one tag of a [`SystemTimer`].
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
  total: Duration,
  window: Duration,
  window_samples: u32,
  average: Duration,
}

/// A timer for the average time spent on tagged operations, such as
/// `"render()"`, for the debug overlay.
pub struct SystemTimer {
  table: CHashMap<&'static str, Tally>,
  // First-seen order, so reports are stable from frame to frame.
  tags: Mutex<Vec<&'static str>>,
}

impl SystemTimer {
  /// Creates a new `SystemTimer`.
  pub fn new() -> Self {
    Self {
      table: CHashMap::new(),
      tags: Mutex::new(Vec::new()),
    }
  }

  /// Starts timing `tag`; the measurement ends when the guard is dropped.
  #[must_use]
  pub fn start(&self, tag: &'static str) -> SystemTimerGuard<'_> {
    SystemTimerGuard {
      timer: self,
      tag,
      start: Instant::now(),
    }
  }

  fn record(&self, tag: &'static str, elapsed: Duration) {
    let tags = &self.tags;
    self.table.upsert(
      tag,
      move || {
        tags.lock().unwrap().push(tag);
        Tally {
          total: elapsed,
          window: elapsed,
          window_samples: 1,
          average: elapsed,
        }
      },
      |t| {
        t.total += elapsed;
        t.window += elapsed;
        t.window_samples += 1;
      },
    );
  }

  /// Returns the total time recorded for `tag`.
  pub fn total_time(&self, tag: &'static str) -> Duration {
    self.table.get(tag).map(|t| t.total).unwrap_or_default()
  }

  /// Folds every tag's samples since the last call into its average, and
  /// returns the averages in first-seen order.
  ///
  /// Tags with no new samples keep their previous average.
  pub fn measure_all(&self) -> Vec<(&'static str, Duration)> {
    let tags = self.tags.lock().unwrap();
    tags
      .iter()
      .filter_map(|&tag| {
        let mut t = self.table.get_mut(tag)?;
        if t.window_samples > 0 {
          t.average = t.window / t.window_samples;
          t.window = Duration::default();
          t.window_samples = 0;
        }
        Some((tag, t.average))
      })
      .collect()
  }
}

impl Default for SystemTimer {
  fn default() -> Self {
    Self::new()
  }
}

/// A guard for a [`SystemTimer::start()`] call.
pub struct SystemTimerGuard<'a> {
  timer: &'a SystemTimer,
  tag: &'static str,
  start: Instant,
}

impl SystemTimerGuard<'_> {
  /// Finishes a timing early.
  pub fn finish(self) {}
}

impl Drop for SystemTimerGuard<'_> {
  fn drop(&mut self) {
    self.timer.record(self.tag, self.start.elapsed());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guards_accumulate() {
    let timer = SystemTimer::new();
    timer.start("a").finish();
    {
      let _t = timer.start("b");
      thread::sleep(Duration::from_millis(2));
    }
    timer.start("a").finish();

    assert!(timer.total_time("b") >= Duration::from_millis(2));
    assert_eq!(timer.total_time("missing"), Duration::default());

    let tags = timer
      .measure_all()
      .into_iter()
      .map(|(tag, _)| tag)
      .collect::<Vec<_>>();
    assert_eq!(tags, vec!["a", "b"]);
  }

  #[test]
  fn averages_persist_without_samples() {
    let timer = SystemTimer::new();
    {
      let _t = timer.start("x");
      thread::sleep(Duration::from_millis(1));
    }
    let first = timer.measure_all();
    let second = timer.measure_all();
    assert_eq!(first, second);
  }

  #[test]
  fn frame_count_advances() {
    let mut frames = FrameTimer::new();
    frames.end_frame(1000);
    frames.end_frame(1000);
    assert_eq!(frames.frame_count(), 2);
  }
}
