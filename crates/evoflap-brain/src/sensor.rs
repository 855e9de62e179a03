//! Sensor normalization.
//!
//! Raw world coordinates span hundreds of units while the controller's sigmoid
//! units respond to values around `0..1`. [`normalize`] rescales each coordinate
//! over the range it takes in normal play:
//!
//! | input | raw value | domain |
//! |---|---|---|
//! | 0 | agent center `y` | `[bird_radius, bird_radius + game_height]` |
//! | 1 | upper edge of the nearest gap | `[pipe_gap_buffer, game_height - pipe_gap_buffer - pipe_gap]` |
//! | 2 | left edge of the nearest obstacle | `[0, scene_width]` |
//!
//! Values outside their domain (an obstacle still entering from the right, an
//! agent falling below the floor) map outside `[0, 1]` and are passed through
//! unclamped.

use evoflap_engine::WorldConfig;

/// Number of values a controller receives each tick.
pub const INPUT_NODES: usize = 3;

/// Normalized controller input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorInput([f64; INPUT_NODES]);

impl SensorInput {
    #[must_use]
    pub const fn new(values: [f64; INPUT_NODES]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub const fn agent_y(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn gap_y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub const fn gap_x(&self) -> f64 {
        self.0[2]
    }
}

/// Maps an agent's position and its nearest obstacle to controller inputs.
#[must_use]
pub fn normalize(world: &WorldConfig, agent_y: f64, gap_y: f64, gap_x: f64) -> SensorInput {
    let gap_span = world.game_height - 2.0 * world.pipe_gap_buffer - world.pipe_gap;
    SensorInput([
        (agent_y - world.bird_radius) / world.game_height,
        (gap_y - world.pipe_gap_buffer) / gap_span,
        gap_x / world.scene_width,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_domain_bounds_map_to_unit_interval() {
        let world = WorldConfig::default();
        let low = normalize(&world, world.bird_radius, world.pipe_gap_buffer, 0.0);
        assert_close(low.agent_y(), 0.0);
        assert_close(low.gap_y(), 0.0);
        assert_close(low.gap_x(), 0.0);

        let high = normalize(
            &world,
            world.bird_radius + world.game_height,
            world.max_gap_y(),
            world.scene_width,
        );
        assert_close(high.agent_y(), 1.0);
        assert_close(high.gap_y(), 1.0);
        assert_close(high.gap_x(), 1.0);
    }

    #[test]
    fn test_default_world_values() {
        let world = WorldConfig::default();
        let input = normalize(&world, 300.0, 240.0, 450.0);
        assert_close(input.agent_y(), 280.0 / 680.0);
        assert_close(input.gap_y(), 140.0 / 280.0);
        assert_close(input.gap_x(), 0.75);
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let world = WorldConfig::default();
        let input = normalize(&world, 0.0, 500.0, 907.0);
        assert!(input.agent_y() < 0.0);
        assert!(input.gap_y() > 1.0);
        assert!(input.gap_x() > 1.0);
    }
}
