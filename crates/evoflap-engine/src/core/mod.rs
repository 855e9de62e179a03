//! Static description of the world: configuration and geometry.

pub use self::{geometry::*, world_config::*};

pub(crate) mod geometry;
pub(crate) mod world_config;
