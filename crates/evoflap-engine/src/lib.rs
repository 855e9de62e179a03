//! World model for the evoflap side-scroller.
//!
//! This crate owns everything the evolving agents fly through but none of the
//! evolutionary logic:
//!
//! - [`WorldConfig`] - Scene dimensions, physics constants, and pipe layout rules
//! - [`Circle`] / [`Rect`] - Minimal geometry used for hit tests
//! - [`Obstacle`] / [`ObstacleCourse`] - Scrolling pipe pairs and their generator
//! - [`RunSeed`] - 128-bit seed for reproducible runs
//!
//! # Coordinate System
//!
//! Screen coordinates: `x` grows to the right, `y` grows downward. The top of the
//! playfield is `y = 0` and the floor is `y = game_height`. Agents fly at a fixed
//! `x` ([`WorldConfig::bird_x`]) while obstacles scroll toward them.
//!
//! # Example
//!
//! ```
//! use evoflap_engine::{ObstacleCourse, WorldConfig};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let world = WorldConfig::default();
//! let mut rng = Pcg32::seed_from_u64(7);
//! let mut course = ObstacleCourse::new(world.clone(), &mut rng);
//!
//! for _ in 0..100 {
//!     course.advance(&mut rng);
//! }
//! let nearest = course.nearest();
//! assert!(nearest.x() < world.scene_width);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Invalid [`WorldConfig`] value.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WorldConfigError {
    #[display("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[display("scroll_speed must be negative (got {value})")]
    ScrollNotLeftward { value: f64 },
    #[display("rebound_velocity must be negative (got {value})")]
    ReboundNotUpward { value: f64 },
    #[display("pipe gap of {gap} with buffer {buffer} does not fit into game height {height}")]
    GapDoesNotFit { gap: f64, buffer: f64, height: f64 },
    #[display("bird start y {start} is outside the playfield [{min}, {max}]")]
    StartOutOfBounds { start: f64, min: f64, max: f64 },
}
