//! The view of the world a population is evaluated against.

use evoflap_engine::ObstacleCourse;

/// Position of the obstacle an agent should steer for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    /// Left edge of the obstacle.
    pub x: f64,
    /// Upper edge of its gap.
    pub gap_y: f64,
}

/// Outcome of a hit test for one agent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSignal {
    pub collided: bool,
    pub below_floor: bool,
}

impl CollisionSignal {
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.collided || self.below_floor
    }
}

/// Everything [`Population::step`](crate::population::Population::step) needs
/// from the world.
pub trait Environment {
    fn nearest_obstacle(&self) -> ObstacleView;
    fn collision(&self, agent_y: f64) -> CollisionSignal;
}

impl Environment for ObstacleCourse {
    fn nearest_obstacle(&self) -> ObstacleView {
        let nearest = self.nearest();
        ObstacleView {
            x: nearest.x(),
            gap_y: nearest.gap_y(),
        }
    }

    fn collision(&self, agent_y: f64) -> CollisionSignal {
        CollisionSignal {
            collided: self.hits(agent_y),
            below_floor: self.is_below_floor(agent_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use evoflap_engine::WorldConfig;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_course_reports_nearest_obstacle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let course = ObstacleCourse::new(WorldConfig::default(), &mut rng);
        let view = course.nearest_obstacle();
        assert!((view.x - course.nearest().x()).abs() < f64::EPSILON);
        assert!((view.gap_y - course.nearest().gap_y()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_course_collision_signal() {
        let world = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let course = ObstacleCourse::new(world.clone(), &mut rng);

        // the first obstacle is still off screen
        let signal = course.collision(world.bird_start_y);
        assert!(!signal.is_fatal());

        let signal = course.collision(world.floor_limit() + 1.0);
        assert!(signal.below_floor);
        assert!(!signal.collided);
        assert!(signal.is_fatal());
    }
}
