//! A single bird: physics, fitness, and lifecycle.

use evoflap_brain::{
    controller::NeuralController,
    matrix::{Mutation, WeightRange},
    sensor::SensorInput,
};
use evoflap_engine::WorldConfig;
use rand::Rng;

use crate::environment::CollisionSignal;

/// Who decides when an agent jumps.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum Pilot {
    /// Jumps are requested from outside (keyboard).
    Manual,
    /// Jumps are decided by an evolved network.
    Neural(NeuralController),
}

impl Pilot {
    #[must_use]
    pub fn controller(&self) -> Option<&NeuralController> {
        match self {
            Self::Manual => None,
            Self::Neural(controller) => Some(controller),
        }
    }

    /// Returns the pilot a child inherits.
    #[must_use]
    pub fn offspring<R>(&self, mutation: Mutation, range: WeightRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Manual => Self::Manual,
            Self::Neural(controller) => Self::Neural(controller.offspring(mutation, range, rng)),
        }
    }
}

/// Where an agent's weights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Lineage {
    Founder,
    /// Child of the agent at `parent_rank` in the previous generation's
    /// fitness ordering (0 = best).
    Offspring { parent_rank: usize },
}

#[derive(Debug, Clone)]
pub struct Agent {
    y: f64,
    velocity: f64,
    alive: bool,
    fitness: u32,
    pilot: Pilot,
    lineage: Lineage,
}

impl Agent {
    /// Creates a live agent at the world's start position.
    #[must_use]
    pub fn new(pilot: Pilot, lineage: Lineage, world: &WorldConfig) -> Self {
        Self {
            y: world.bird_start_y,
            velocity: 0.0,
            alive: true,
            fitness: 0,
            pilot,
            lineage,
        }
    }

    /// Vertical center position.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Vertical velocity; negative values move up.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of ticks survived.
    #[must_use]
    pub const fn fitness(&self) -> u32 {
        self.fitness
    }

    #[must_use]
    pub const fn pilot(&self) -> &Pilot {
        &self.pilot
    }

    #[must_use]
    pub fn controller(&self) -> Option<&NeuralController> {
        self.pilot.controller()
    }

    #[must_use]
    pub const fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Advances the physics by one tick.
    ///
    /// Gravity is applied to the velocity first, then the position moves by
    /// `velocity × dt²`. An agent that reaches the ceiling stops there.
    pub fn tick(&mut self, world: &WorldConfig) {
        if !self.alive {
            return;
        }
        self.velocity += world.gravity * world.dt;
        self.y += self.velocity * world.dt * world.dt;
        if self.y <= world.ceiling() {
            self.y = world.ceiling();
            self.velocity = 0.0;
        }
    }

    /// Asks the pilot whether to jump. Manual pilots never jump on their own.
    #[must_use]
    pub fn decide_jump(&self, input: &SensorInput, threshold: f64) -> bool {
        match &self.pilot {
            Pilot::Manual => false,
            Pilot::Neural(controller) => controller.decide(input) >= threshold,
        }
    }

    pub fn apply_jump(&mut self, rebound_velocity: f64) {
        if self.alive {
            self.velocity = rebound_velocity;
        }
    }

    /// Credits one tick of survival, then checks whether the agent dies.
    ///
    /// Returns `true` if the agent is still alive. Dead agents are left
    /// untouched.
    pub fn evaluate_death(&mut self, signal: CollisionSignal, world: &WorldConfig) -> bool {
        if !self.alive {
            return false;
        }
        self.fitness += 1;
        if signal.is_fatal() || self.y > world.floor_limit() {
            self.alive = false;
        }
        self.alive
    }

    /// Retires the agent without changing its fitness.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Puts the agent back at the start, alive and with zero fitness.
    pub fn reset(&mut self, world: &WorldConfig) {
        self.y = world.bird_start_y;
        self.velocity = 0.0;
        self.alive = true;
        self.fitness = 0;
    }

    #[cfg(test)]
    pub(crate) fn set_fitness(&mut self, fitness: u32) {
        self.fitness = fitness;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const SAFE: CollisionSignal = CollisionSignal {
        collided: false,
        below_floor: false,
    };
    const HIT: CollisionSignal = CollisionSignal {
        collided: true,
        below_floor: false,
    };

    fn manual(world: &WorldConfig) -> Agent {
        Agent::new(Pilot::Manual, Lineage::Founder, world)
    }

    #[test]
    fn test_new_agent_state() {
        let world = WorldConfig::default();
        let agent = manual(&world);
        assert!(agent.is_alive());
        assert_eq!(agent.fitness(), 0);
        assert!((agent.y() - 300.0).abs() < f64::EPSILON);
        assert!(agent.velocity().abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_tick_physics() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.tick(&world);
        assert!((agent.velocity() - 16.0).abs() < 1e-12);
        assert!((agent.y() - 300.004_096).abs() < 1e-9);
    }

    #[test]
    fn test_jump_sets_velocity() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.tick(&world);
        agent.apply_jump(world.rebound_velocity);
        assert!((agent.velocity() - world.rebound_velocity).abs() < f64::EPSILON);
        agent.tick(&world);
        assert!(agent.y() < 300.004_096);
    }

    #[test]
    fn test_ceiling_clamp() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.y = world.bird_radius + 0.01;
        agent.velocity = -4000.0;
        agent.tick(&world);
        assert!((agent.y() - world.bird_radius).abs() < f64::EPSILON);
        assert!(agent.velocity().abs() < f64::EPSILON);
    }

    #[test]
    fn test_ceiling_clamp_on_exact_contact() {
        // dt² = 0.25 and no gravity, so one tick moves the bird by exactly -1
        let world = WorldConfig {
            gravity: 0.0,
            dt: 0.5,
            ..WorldConfig::default()
        };
        let mut agent = manual(&world);
        agent.y = world.bird_radius + 1.0;
        agent.velocity = -4.0;
        agent.tick(&world);
        assert_eq!(agent.y(), world.bird_radius);
        assert_eq!(agent.velocity(), 0.0);
    }

    #[test]
    fn test_fitness_counts_the_fatal_tick() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        assert!(agent.evaluate_death(SAFE, &world));
        assert!(agent.evaluate_death(SAFE, &world));
        assert!(!agent.evaluate_death(HIT, &world));
        assert_eq!(agent.fitness(), 3);
        assert!(!agent.is_alive());
    }

    #[test]
    fn test_death_is_permanent() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        assert!(!agent.evaluate_death(HIT, &world));
        let y = agent.y();
        for _ in 0..10 {
            agent.tick(&world);
            agent.apply_jump(world.rebound_velocity);
            assert!(!agent.evaluate_death(SAFE, &world));
        }
        assert_eq!(agent.fitness(), 1);
        assert!((agent.y() - y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dies_below_floor_without_signal() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.y = world.floor_limit() + 0.5;
        assert!(!agent.evaluate_death(SAFE, &world));
    }

    #[test]
    fn test_kill_keeps_fitness() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.evaluate_death(SAFE, &world);
        agent.kill();
        assert!(!agent.is_alive());
        assert_eq!(agent.fitness(), 1);
    }

    #[test]
    fn test_reset() {
        let world = WorldConfig::default();
        let mut agent = manual(&world);
        agent.tick(&world);
        agent.evaluate_death(HIT, &world);
        agent.reset(&world);
        assert!(agent.is_alive());
        assert_eq!(agent.fitness(), 0);
        assert!((agent.y() - world.bird_start_y).abs() < f64::EPSILON);
        assert!(agent.pilot().is_manual());
    }

    #[test]
    fn test_manual_pilot_never_jumps() {
        let world = WorldConfig::default();
        let agent = manual(&world);
        let input = SensorInput::new([0.0, 0.0, 0.0]);
        assert!(!agent.decide_jump(&input, 0.0));
    }

    #[test]
    fn test_neural_pilot_threshold() {
        let world = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let controller = NeuralController::founder(6, WeightRange::default(), &mut rng);
        let input = SensorInput::new([0.4, 0.5, 0.9]);
        let score = controller.decide(&input);
        let agent = Agent::new(Pilot::Neural(controller), Lineage::Founder, &world);
        assert!(agent.decide_jump(&input, score));
        assert!(!agent.decide_jump(&input, score + 1e-9));
    }
}
