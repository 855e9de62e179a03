use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Upper bound on ticks delivered in one batch.
///
/// After a long stall (terminal suspended, debugger) the loop skips ahead
/// instead of replaying every missed tick.
const MAX_TICKS_PER_BATCH: u32 = 256;

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after every tick batch or terminal event.
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Decides which event comes next: a tick batch, a render, or terminal input.
///
/// No tick events are produced until a tick interval is set.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: now.checked_sub(Duration::from_secs(86400)).unwrap_or(now),
            dirty: true,
        }
    }

    /// Sets the tick interval. `None` pauses ticking.
    ///
    /// Changing the interval restarts the tick clock, so a speed change never
    /// produces a burst of ticks at the new rate.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if interval != self.tick_interval {
            self.tick_interval = interval;
            self.last_tick = Instant::now();
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let ticks = self.due_ticks(now);
            if ticks > 0 {
                self.dirty = true;
                return Ok(TuiEvent::Tick(ticks));
            }

            if self.take_render(now) {
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Counts whole tick intervals elapsed since the last tick and consumes them.
    fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(interval) = self.tick_interval else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = elapsed.as_nanos() / interval.as_nanos().max(1);
        if due == 0 {
            return 0;
        }
        let Ok(ticks) = u32::try_from(due) else {
            self.last_tick = now;
            return MAX_TICKS_PER_BATCH;
        };
        if ticks > MAX_TICKS_PER_BATCH {
            self.last_tick = now;
            return MAX_TICKS_PER_BATCH;
        }
        self.last_tick += interval * ticks;
        ticks
    }

    fn take_render(&mut self, now: Instant) -> bool {
        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
        }
        render
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn ticking(interval: Duration) -> (EventLoop, Instant) {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.tick_interval = Some(interval);
        (events, start)
    }

    #[test]
    fn test_no_ticks_without_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        assert_eq!(events.due_ticks(start + 1000 * MS), 0);
    }

    #[test]
    fn test_ticks_wait_for_full_interval() {
        let (mut events, start) = ticking(10 * MS);
        assert_eq!(events.due_ticks(start + 9 * MS), 0);
        assert_eq!(events.due_ticks(start + 10 * MS), 1);
        assert_eq!(events.due_ticks(start + 15 * MS), 0);
    }

    #[test]
    fn test_missed_ticks_are_batched() {
        let (mut events, start) = ticking(10 * MS);
        assert_eq!(events.due_ticks(start + 35 * MS), 3);
        // the 5ms remainder carries over
        assert_eq!(events.due_ticks(start + 40 * MS), 1);
        assert_eq!(events.last_tick, start + 40 * MS);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let (mut events, start) = ticking(MS);
        let now = start + 10_000 * MS;
        assert_eq!(events.due_ticks(now), MAX_TICKS_PER_BATCH);
        assert_eq!(events.last_tick, now);
        assert_eq!(events.due_ticks(now), 0);
    }

    #[test]
    fn test_on_dirty_renders_once() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        assert!(events.take_render(start));
        assert!(!events.take_render(start));
        events.dirty = true;
        assert!(events.take_render(start));
    }

    #[test]
    fn test_throttled_render_waits() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Throttled(20 * MS));
        assert!(events.take_render(start));
        events.dirty = true;
        assert!(!events.take_render(start + 5 * MS));
        assert!(events.take_render(start + 20 * MS));
    }

    #[test]
    fn test_timeout_targets_next_tick() {
        let (mut events, start) = ticking(10 * MS);
        events.set_render_mode(RenderMode::Throttled(50 * MS));
        events.last_render = start;
        events.dirty = false;
        assert_eq!(events.compute_timeout(start + 4 * MS), Some(6 * MS));
        events.dirty = true;
        assert_eq!(events.compute_timeout(start + 4 * MS), Some(6 * MS));
    }
}
