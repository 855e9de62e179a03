use std::collections::VecDeque;

use rand::Rng;

use crate::{Circle, Rect, WorldConfig};

/// A pair of pipes with an opening between them.
///
/// The upper pipe spans from the top of the playfield down to `gap_y`; the lower
/// pipe starts `pipe_gap` below that and extends to the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    x: f64,
    gap_y: f64,
}

impl Obstacle {
    #[must_use]
    pub const fn new(x: f64, gap_y: f64) -> Self {
        Self { x, gap_y }
    }

    /// Left edge of both pipes.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Upper edge of the opening.
    #[must_use]
    pub const fn gap_y(&self) -> f64 {
        self.gap_y
    }

    #[must_use]
    pub fn upper_rect(&self, world: &WorldConfig) -> Rect {
        Rect::new(self.x, 0.0, world.pipe_width, self.gap_y)
    }

    #[must_use]
    pub fn lower_rect(&self, world: &WorldConfig) -> Rect {
        let top = self.gap_y + world.pipe_gap;
        Rect::new(self.x, top, world.pipe_width, world.game_height - top)
    }

    /// Spawns an obstacle whose gap is placed near the previous one.
    ///
    /// The previous gap is first clamped to the valid range, then the new gap is
    /// drawn uniformly within `next_gap_range` of it while keeping
    /// `pipe_gap_buffer` clearance from both edges.
    fn spawn<R>(world: &WorldConfig, x: f64, prev_gap_y: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let max_gap_y = world.max_gap_y();
        let prev_gap_y = prev_gap_y.min(max_gap_y);
        let low = f64::max(world.pipe_gap_buffer, prev_gap_y - world.next_gap_range);
        let high = f64::min(prev_gap_y + world.next_gap_range, max_gap_y);
        let gap_y = if high > low {
            rng.random_range(low..high)
        } else {
            low
        };
        Self { x, gap_y }
    }
}

/// The scrolling sequence of obstacles shared by every agent of a run.
///
/// The course always holds at least one obstacle. New obstacles enter from the
/// right once the last one is on screen, and the leftmost one is discarded after
/// it has fully left the scene.
#[derive(Debug, Clone)]
pub struct ObstacleCourse {
    world: WorldConfig,
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleCourse {
    /// Creates a course with a single obstacle at the right edge of the scene.
    #[must_use]
    pub fn new<R>(world: WorldConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut this = Self {
            world,
            obstacles: VecDeque::new(),
        };
        this.reset(rng);
        this
    }

    /// Discards every obstacle and starts over with a fresh first obstacle.
    pub fn reset<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let prev_gap_y = rng.random_range(0.0..self.world.game_height);
        let first = Obstacle::spawn(&self.world, self.world.scene_width, prev_gap_y, rng);
        self.obstacles.clear();
        self.obstacles.push_back(first);
    }

    #[must_use]
    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    /// Obstacles from left to right.
    pub fn obstacles(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    /// Scrolls the course by one tick, spawning and discarding obstacles as needed.
    pub fn advance<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for obstacle in &mut self.obstacles {
            obstacle.x += self.world.scroll_speed;
        }

        let last = *self.last();
        if last.x < self.world.scene_width {
            let x = last.x + self.world.pipe_width + self.world.pipe_spacing;
            let next = Obstacle::spawn(&self.world, x, last.gap_y, rng);
            self.obstacles.push_back(next);
        }

        if self.first().x < -self.world.pipe_width && self.obstacles.len() > 1 {
            self.obstacles.pop_front();
        }
    }

    /// Returns the leftmost obstacle the agents have not yet flown past.
    ///
    /// Falls back to the leftmost obstacle if every obstacle has been passed.
    #[must_use]
    pub fn nearest(&self) -> &Obstacle {
        let threshold = self.world.bird_x - self.world.pipe_width - self.world.bird_radius;
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.x >= threshold)
            .unwrap_or_else(|| self.first())
    }

    /// Returns `true` if an agent centered at `agent_y` touches the nearest obstacle.
    #[must_use]
    pub fn hits(&self, agent_y: f64) -> bool {
        let body = Circle::new(self.world.bird_x, agent_y, self.world.bird_radius);
        let nearest = self.nearest();
        body.intersects(&nearest.upper_rect(&self.world))
            || body.intersects(&nearest.lower_rect(&self.world))
    }

    /// Returns `true` if an agent centered at `agent_y` has dropped out of the world.
    #[must_use]
    pub fn is_below_floor(&self, agent_y: f64) -> bool {
        agent_y > self.world.floor_limit()
    }

    /// Returns `true` during the single tick in which the nearest obstacle's right
    /// edge crosses the agents' x position.
    #[must_use]
    pub fn is_passing_nearest(&self) -> bool {
        let right = self.nearest().x + self.world.pipe_width;
        self.world.bird_x <= right && self.world.bird_x > right + self.world.scroll_speed
    }

    fn first(&self) -> &Obstacle {
        self.obstacles
            .front()
            .expect("obstacle course should never be empty")
    }

    fn last(&self) -> &Obstacle {
        self.obstacles
            .back()
            .expect("obstacle course should never be empty")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn course_with(obstacles: &[Obstacle]) -> ObstacleCourse {
        ObstacleCourse {
            world: WorldConfig::default(),
            obstacles: obstacles.iter().copied().collect(),
        }
    }

    #[test]
    fn test_new_course_starts_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        let course = ObstacleCourse::new(WorldConfig::default(), &mut rng);
        assert_eq!(course.obstacles().len(), 1);
        assert!((course.nearest().x() - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gaps_stay_in_valid_range() {
        let world = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut course = ObstacleCourse::new(world.clone(), &mut rng);
        let mut prev: Option<Obstacle> = None;
        for _ in 0..5000 {
            course.advance(&mut rng);
            for obstacle in course.obstacles() {
                assert!(obstacle.gap_y() >= world.pipe_gap_buffer);
                assert!(obstacle.gap_y() <= world.max_gap_y());
            }
            let last = *course.obstacles().last().unwrap();
            if let Some(prev) = prev
                && prev.x() != last.x() - world.scroll_speed
            {
                assert!((last.gap_y() - prev.gap_y()).abs() <= world.next_gap_range);
            }
            prev = Some(last);
        }
    }

    #[test]
    fn test_advance_spawns_and_discards() {
        let world = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut course = ObstacleCourse::new(world.clone(), &mut rng);

        course.advance(&mut rng);
        let xs: Vec<f64> = course.obstacles().map(Obstacle::x).collect();
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 597.0).abs() < 1e-9);
        assert!((xs[1] - (597.0 + world.pipe_width + world.pipe_spacing)).abs() < 1e-9);

        for _ in 0..1000 {
            course.advance(&mut rng);
            assert!(course.obstacles().all(|o| o.x() >= -world.pipe_width - 3.0));
            assert!(course.obstacles().len() <= 4);
        }
    }

    #[test]
    fn test_nearest_skips_passed_obstacle() {
        let course = course_with(&[Obstacle::new(10.0, 200.0), Obstacle::new(320.0, 150.0)]);
        // threshold = 100 - 60 - 20 = 20
        assert!((course.nearest().x() - 320.0).abs() < f64::EPSILON);

        let course = course_with(&[Obstacle::new(20.0, 200.0), Obstacle::new(320.0, 150.0)]);
        assert!((course.nearest().x() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hits_pipes_but_not_gap() {
        let course = course_with(&[Obstacle::new(90.0, 200.0)]);
        assert!(course.hits(100.0));
        assert!(course.hits(390.0));
        assert!(!course.hits(300.0));
    }

    #[test]
    fn test_no_hit_before_obstacle_arrives() {
        let course = course_with(&[Obstacle::new(400.0, 200.0)]);
        assert!(!course.hits(50.0));
    }

    #[test]
    fn test_below_floor() {
        let course = course_with(&[Obstacle::new(400.0, 200.0)]);
        assert!(!course.is_below_floor(700.0));
        assert!(course.is_below_floor(700.5));
    }

    #[test]
    fn test_passing_window_is_one_tick() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut course = ObstacleCourse::new(WorldConfig::default(), &mut rng);
        let passes = (0..190)
            .filter(|_| {
                course.advance(&mut rng);
                course.is_passing_nearest()
            })
            .count();
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_same_seed_same_course() {
        let world = WorldConfig::default();
        let mut rng_a = Pcg32::seed_from_u64(5);
        let mut rng_b = Pcg32::seed_from_u64(5);
        let mut a = ObstacleCourse::new(world.clone(), &mut rng_a);
        let mut b = ObstacleCourse::new(world, &mut rng_b);
        for _ in 0..500 {
            a.advance(&mut rng_a);
            b.advance(&mut rng_b);
        }
        assert!(a.obstacles().eq(b.obstacles()));
    }
}
