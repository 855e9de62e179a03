//! Generational evolution of neural agents.
//!
//! A [`Population`] alternates between two states:
//!
//! - [`GenerationState::Running`]: the driver calls [`Population::step`] once per
//!   tick until every agent is dead or retired.
//! - [`GenerationState::Ended`]: the driver calls [`Population::end_generation`],
//!   which ranks the agents, breeds the next generation, and returns to
//!   `Running`.
//!
//! Reproduction is single-parent: each child is a mutated copy of one elite.
//! Elites are the top `floor(population_size × selection_rate)` agents whose
//! fitness exceeds the minimum fitness, and children are assigned to them round
//! robin. If no agent qualifies, the next generation is built entirely from
//! founders.

use std::cmp::Reverse;

use evoflap_brain::{controller::NeuralController, sensor};
use evoflap_engine::WorldConfig;
use rand::Rng;

use crate::{
    agent::{Agent, Lineage, Pilot},
    environment::Environment,
    params::{EvolutionParams, ParamsError},
    stats::{FitnessStats, GenerationSummary},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GenerationState {
    Running,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Population {
    world: WorldConfig,
    params: EvolutionParams,
    min_fitness: u32,
    agents: Vec<Agent>,
    state: GenerationState,
    generation: u32,
    num_alive: usize,
    current_fitness: u32,
    last_average_fitness: u32,
    last_best_fitness: u32,
    best_fitness_ever: u32,
}

impl Population {
    /// Creates generation 1, made entirely of founders.
    pub fn new<R>(
        world: WorldConfig,
        params: EvolutionParams,
        rng: &mut R,
    ) -> Result<Self, ParamsError>
    where
        R: Rng + ?Sized,
    {
        params.validate()?;
        let min_fitness = params.min_fitness(&world);
        let mut this = Self {
            world,
            params,
            min_fitness,
            agents: vec![],
            state: GenerationState::Running,
            generation: 1,
            num_alive: 0,
            current_fitness: 0,
            last_average_fitness: 0,
            last_best_fitness: 0,
            best_fitness_ever: 0,
        };
        this.agents = (0..this.params.population_size)
            .map(|_| this.founder(rng))
            .collect();
        this.num_alive = this.agents.len();
        Ok(this)
    }

    fn founder<R>(&self, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        let controller =
            NeuralController::founder(self.params.hidden_nodes, self.params.weight_range, rng);
        Agent::new(Pilot::Neural(controller), Lineage::Founder, &self.world)
    }

    #[must_use]
    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// Fitness an agent must exceed to reproduce.
    #[must_use]
    pub fn min_fitness(&self) -> u32 {
        self.min_fitness
    }

    /// Agents in their current order.
    ///
    /// Between [`end_generation`](Self::end_generation) calls this is the order
    /// they were bred in. Dead agents stay in place.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Current generation number, starting at 1.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Agents still flying after the last step.
    #[must_use]
    pub fn num_alive(&self) -> usize {
        self.num_alive
    }

    /// Fitness of the last agent processed alive in the latest step.
    #[must_use]
    pub fn current_fitness(&self) -> u32 {
        self.current_fitness
    }

    #[must_use]
    pub fn last_average_fitness(&self) -> u32 {
        self.last_average_fitness
    }

    #[must_use]
    pub fn last_best_fitness(&self) -> u32 {
        self.last_best_fitness
    }

    #[must_use]
    pub fn best_fitness_ever(&self) -> u32 {
        self.best_fitness_ever
    }

    /// Advances every live agent by one tick against `env`.
    ///
    /// Agents are processed in index order: sense, decide, jump, move, then
    /// check for death. An agent reaching `max_fitness` is retired. Once no agent
    /// is left the generation ends.
    ///
    /// # Panics
    ///
    /// Panics if the generation has already ended.
    pub fn step<E>(&mut self, env: &E) -> GenerationState
    where
        E: Environment + ?Sized,
    {
        assert!(
            self.state.is_running(),
            "cannot step a generation that has ended"
        );

        let obstacle = env.nearest_obstacle();
        let threshold = self.params.jump_threshold;
        let max_fitness = self.params.max_fitness;
        self.num_alive = 0;

        for agent in self.agents.iter_mut().filter(|agent| agent.is_alive()) {
            let input = sensor::normalize(&self.world, agent.y(), obstacle.gap_y, obstacle.x);
            if agent.decide_jump(&input, threshold) {
                agent.apply_jump(self.world.rebound_velocity);
            }
            agent.tick(&self.world);
            if !agent.evaluate_death(env.collision(agent.y()), &self.world) {
                continue;
            }

            self.current_fitness = agent.fitness();
            if agent.fitness() >= max_fitness {
                agent.kill();
            } else {
                self.num_alive += 1;
            }
        }

        if self.num_alive == 0 {
            self.state = GenerationState::Ended;
        }
        self.state
    }

    /// Ranks the finished generation and replaces it with the next one.
    ///
    /// # Panics
    ///
    /// Panics if the generation is still running.
    pub fn end_generation<R>(&mut self, rng: &mut R) -> GenerationSummary
    where
        R: Rng + ?Sized,
    {
        assert!(
            self.state.is_ended(),
            "cannot end a generation that is still running"
        );

        // stable: ties keep their index order
        self.agents.sort_by_key(|agent| Reverse(agent.fitness()));

        let fitness = FitnessStats::new(self.agents.iter().map(Agent::fitness))
            .expect("population should never be empty");
        let total = self
            .agents
            .iter()
            .map(|agent| u64::from(agent.fitness()))
            .sum::<u64>();
        self.last_best_fitness = self.agents[0].fitness();
        self.last_average_fitness =
            u32::try_from(total / self.agents.len() as u64).unwrap_or(u32::MAX);
        self.best_fitness_ever = self.best_fitness_ever.max(self.last_best_fitness);

        let elites = self
            .agents
            .iter()
            .take(self.params.elite_count())
            .take_while(|agent| agent.fitness() > self.min_fitness)
            .count();

        let next: Vec<Agent> = if elites == 0 {
            tracing::debug!(
                generation = self.generation,
                best_fitness = self.last_best_fitness,
                min_fitness = self.min_fitness,
                "no agent qualified for reproduction, restarting from founders"
            );
            (0..self.agents.len()).map(|_| self.founder(rng)).collect()
        } else {
            let EvolutionParams {
                mutation,
                weight_range,
                ..
            } = self.params;
            (0..self.agents.len())
                .map(|i| {
                    let parent_rank = i % elites;
                    let pilot = self.agents[parent_rank]
                        .pilot()
                        .offspring(mutation, weight_range, rng);
                    Agent::new(pilot, Lineage::Offspring { parent_rank }, &self.world)
                })
                .collect()
        };

        let summary = GenerationSummary {
            generation: self.generation,
            best_fitness: self.last_best_fitness,
            average_fitness: self.last_average_fitness,
            best_fitness_ever: self.best_fitness_ever,
            elite_count: elites,
            restarted: elites == 0,
            fitness,
        };
        tracing::debug!(
            generation = summary.generation,
            best_fitness = summary.best_fitness,
            average_fitness = summary.average_fitness,
            elites,
            "generation ended"
        );

        self.agents = next;
        self.generation += 1;
        self.state = GenerationState::Running;
        self.num_alive = self.agents.len();
        self.current_fitness = 0;
        summary
    }
}
