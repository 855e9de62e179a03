use serde::{Deserialize, Serialize};

use crate::WorldConfigError;

/// Scene dimensions, physics constants, and obstacle layout rules.
///
/// All lengths are in scene units (the default playfield is 600 × 680), all
/// velocities in units per second. One simulation tick advances time by [`dt`].
///
/// Fields omitted from a deserialized config fall back to [`WorldConfig::default`].
///
/// [`dt`]: Self::dt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible width of the scene.
    pub scene_width: f64,
    /// Playable height (floor is at `y = game_height`).
    pub game_height: f64,
    /// Downward acceleration applied every tick.
    pub gravity: f64,
    /// Vertical velocity set by a jump (negative = upward).
    pub rebound_velocity: f64,
    /// Seconds per tick.
    pub dt: f64,
    /// Horizontal obstacle displacement per tick (negative = leftward).
    pub scroll_speed: f64,
    /// Fixed horizontal position of every agent.
    pub bird_x: f64,
    /// Vertical position agents are spawned at.
    pub bird_start_y: f64,
    /// Agent collision radius.
    pub bird_radius: f64,
    pub pipe_width: f64,
    /// Vertical size of the opening between upper and lower pipe.
    pub pipe_gap: f64,
    /// Horizontal space between consecutive pipes.
    pub pipe_spacing: f64,
    /// Minimum distance between a gap and the top or bottom edge.
    pub pipe_gap_buffer: f64,
    /// Maximum vertical distance between consecutive gaps.
    pub next_gap_range: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            scene_width: 600.0,
            game_height: 680.0,
            gravity: 1000.0,
            rebound_velocity: -400.0,
            dt: 0.016,
            scroll_speed: -3.0,
            bird_x: 100.0,
            bird_start_y: 300.0,
            bird_radius: 20.0,
            pipe_width: 60.0,
            pipe_gap: 200.0,
            pipe_spacing: 250.0,
            pipe_gap_buffer: 100.0,
            next_gap_range: 200.0,
        }
    }
}

impl WorldConfig {
    /// Checks that the configuration describes a playable world.
    pub fn validate(&self) -> Result<(), WorldConfigError> {
        let positives = [
            ("scene_width", self.scene_width),
            ("game_height", self.game_height),
            ("dt", self.dt),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("next_gap_range", self.next_gap_range),
        ];
        for (field, value) in positives {
            if !(value > 0.0 && value.is_finite()) {
                return Err(WorldConfigError::NotPositive { field, value });
            }
        }
        if self.scroll_speed.is_nan() || self.scroll_speed >= 0.0 {
            return Err(WorldConfigError::ScrollNotLeftward {
                value: self.scroll_speed,
            });
        }
        if self.rebound_velocity.is_nan() || self.rebound_velocity >= 0.0 {
            return Err(WorldConfigError::ReboundNotUpward {
                value: self.rebound_velocity,
            });
        }
        // the gap must have room to move, or sensor normalization divides by zero
        if self.pipe_gap_buffer.is_nan() || self.max_gap_y() <= self.pipe_gap_buffer {
            return Err(WorldConfigError::GapDoesNotFit {
                gap: self.pipe_gap,
                buffer: self.pipe_gap_buffer,
                height: self.game_height,
            });
        }
        if !(self.bird_radius..=self.game_height).contains(&self.bird_start_y) {
            return Err(WorldConfigError::StartOutOfBounds {
                start: self.bird_start_y,
                min: self.bird_radius,
                max: self.game_height,
            });
        }
        Ok(())
    }

    /// Highest point an agent's center can reach (agents are clamped here).
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.bird_radius
    }

    /// An agent whose center is below this line has fallen out of the world.
    #[must_use]
    pub fn floor_limit(&self) -> f64 {
        self.game_height + self.bird_radius
    }

    /// Largest allowed upper edge of a pipe gap.
    #[must_use]
    pub fn max_gap_y(&self) -> f64 {
        self.game_height - self.pipe_gap_buffer - self.pipe_gap
    }

    /// Number of ticks an obstacle needs to travel from the agent to the right edge.
    ///
    /// An agent has to live longer than this to have met at least one obstacle,
    /// which makes it the natural lower bound for reproduction.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn min_fitness(&self) -> u32 {
        ((self.scene_width - self.bird_x - self.bird_radius) / -self.scroll_speed) as u32
    }

    /// Ticks per second of simulated time.
    #[must_use]
    pub fn tick_rate(&self) -> f64 {
        1.0 / self.dt
    }
}
