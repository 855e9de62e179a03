//! Single-player mode: one keyboard-controlled bird.

use evoflap_engine::{ObstacleCourse, RunSeed, WorldConfig, WorldConfigError};
use rand_pcg::Pcg32;

use crate::{
    agent::{Agent, Lineage, Pilot},
    environment::Environment as _,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ManualTick {
    Flying,
    /// The bird died; the game has already been reset.
    Crashed { score: u32 },
}

/// A game with a single [`Pilot::Manual`] agent.
///
/// The score counts obstacles passed in the current attempt. A crash resets the
/// bird and the course but keeps the high score.
#[derive(Debug, Clone)]
pub struct ManualGame {
    rng: Pcg32,
    course: ObstacleCourse,
    agent: Agent,
    score: u32,
    high_score: u32,
    attempts: u32,
}

impl ManualGame {
    pub fn new(world: WorldConfig, seed: RunSeed) -> Result<Self, WorldConfigError> {
        world.validate()?;
        let mut rng = seed.rng();
        let agent = Agent::new(Pilot::Manual, Lineage::Founder, &world);
        let course = ObstacleCourse::new(world, &mut rng);
        Ok(Self {
            rng,
            course,
            agent,
            score: 0,
            high_score: 0,
            attempts: 1,
        })
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub fn course(&self) -> &ObstacleCourse {
        &self.course
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Number of attempts, including the current one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn jump(&mut self) {
        self.agent.apply_jump(self.course.world().rebound_velocity);
    }

    pub fn tick(&mut self) -> ManualTick {
        self.agent.tick(self.course.world());
        self.course.advance(&mut self.rng);
        if self.course.is_passing_nearest() {
            self.score += 1;
            self.high_score = self.high_score.max(self.score);
        }

        let signal = self.course.collision(self.agent.y());
        if self.agent.evaluate_death(signal, self.course.world()) {
            return ManualTick::Flying;
        }

        let score = self.score;
        tracing::debug!(score, high_score = self.high_score, "crashed");
        self.agent.reset(self.course.world());
        self.course.reset(&mut self.rng);
        self.score = 0;
        self.attempts += 1;
        ManualTick::Crashed { score }
    }
}
