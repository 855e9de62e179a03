//! Time-dependent world state.
//!
//! - [`ObstacleCourse`] - Scrolling pipes, nearest-obstacle lookup, and hit tests
//! - [`RunSeed`] - Seed for deterministic runs (obstacles and network weights)

pub use self::{obstacle_course::*, run_seed::*};

mod obstacle_course;
mod run_seed;
