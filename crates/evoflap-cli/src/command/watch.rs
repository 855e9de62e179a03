use crossterm::event::{Event, KeyCode};
use evoflap_runtime::{App, RenderMode, Runtime};
use evoflap_training::simulation::Simulation;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use crate::{
    config::RunArg,
    view::widgets::{KeyBindingDisplay, SceneDisplay, StatRow, StatsDisplay, style},
};

const RENDER_RATE: f64 = 60.0;

/// Simulation speed relative to real time.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, derive_more::Display,
)]
pub(crate) enum Speed {
    #[default]
    #[value(name = "1")]
    #[display("x1")]
    Normal,
    #[value(name = "2")]
    #[display("x2")]
    Double,
    #[value(name = "5")]
    #[display("x5")]
    Fast,
    #[value(name = "max")]
    #[display("max")]
    Max,
}

impl Speed {
    pub(crate) fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Double => 2.0,
            Self::Fast => 5.0,
            Self::Max => 25.0,
        }
    }

    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('1') => Some(Self::Normal),
            KeyCode::Char('2') => Some(Self::Double),
            KeyCode::Char('5') => Some(Self::Fast),
            KeyCode::Char('m') => Some(Self::Max),
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    #[clap(flatten)]
    run: RunArg,
    /// Initial simulation speed
    #[arg(long, value_enum, default_value_t)]
    speed: Speed,
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let WatchArg { run, speed } = arg;
    let config = run.load_config()?;
    let sim = Simulation::new(config.world, config.evolution, run.seed())?;
    let mut app = WatchApp::new(sim, *speed);
    Runtime::new().run(&mut app)?;
    Ok(())
}

#[derive(Debug)]
struct WatchApp {
    sim: Simulation,
    speed: Speed,
    is_paused: bool,
    is_exiting: bool,
}

impl WatchApp {
    fn new(sim: Simulation, speed: Speed) -> Self {
        Self {
            sim,
            speed,
            is_paused: false,
            is_exiting: false,
        }
    }

    fn tick_rate(&self) -> Option<f64> {
        (!self.is_paused).then(|| self.sim.world().tick_rate() * self.speed.multiplier())
    }

    fn stat_rows(&self) -> Vec<StatRow> {
        let population = self.sim.population();
        let mut rows = vec![
            StatRow::LabelValue("Generation", population.generation().to_string()),
            StatRow::LabelValue(
                "Alive",
                format!(
                    "{}/{}",
                    population.num_alive(),
                    population.agents().len()
                ),
            ),
            StatRow::LabelValue("Fitness", population.current_fitness().to_string()),
            StatRow::Empty,
            StatRow::LabelValue("Last best", population.last_best_fitness().to_string()),
            StatRow::LabelValue(
                "Last average",
                population.last_average_fitness().to_string(),
            ),
            StatRow::LabelValue("Best ever", population.best_fitness_ever().to_string()),
            StatRow::LabelValue("Min fitness", population.min_fitness().to_string()),
            StatRow::LabelValue(
                "Elite slots",
                population.params().elite_count().to_string(),
            ),
        ];
        if let Some(last) = self.sim.history().last() {
            rows.extend([
                StatRow::LabelValue("Elites", last.elite_count.to_string()),
                StatRow::LabelValue("Median", last.fitness.median.to_string()),
                StatRow::LabelValue("Std dev", format!("{:.1}", last.fitness.std_dev)),
            ]);
        }
        let restarts = self.sim.history().iter().filter(|s| s.restarted).count();
        rows.extend([
            StatRow::LabelValue("Restarts", restarts.to_string()),
            StatRow::Empty,
            StatRow::LabelValue("Speed", self.speed.to_string()),
            StatRow::LabelValue("Seed", self.sim.seed().to_string()[..8].to_owned()),
        ]);
        rows
    }
}

impl App for WatchApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(RENDER_RATE));
        runtime.set_tick_rate(self.tick_rate());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        match event.code {
            KeyCode::Char('p') => self.is_paused = !self.is_paused,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            code => {
                if let Some(speed) = Speed::from_key(code) {
                    self.speed = speed;
                }
            }
        }
        runtime.set_tick_rate(self.tick_rate());
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.sim.tick();
    }

    fn draw(&self, frame: &mut Frame) {
        let population = self.sim.population();
        let title = if self.is_paused {
            " evoflap (paused) "
        } else {
            " evoflap "
        };
        let border_style = if self.is_paused {
            style::PAUSED_BORDER
        } else {
            style::RUNNING_BORDER
        };

        let birds = population
            .agents()
            .iter()
            .filter(|agent| agent.is_alive())
            .map(|agent| agent.y());
        let scene = SceneDisplay::new(self.sim.course())
            .birds(birds)
            .block(
                BlockWidget::bordered()
                    .title(Line::from(title).centered())
                    .border_style(border_style),
            );
        let stats = StatsDisplay::new(self.stat_rows())
            .block(BlockWidget::bordered().title(Line::from(" Population ").centered()));

        let bindings = [
            (&["1", "2", "5", "M"][..], "Speed"),
            (&["P"][..], if self.is_paused { "Resume" } else { "Pause" }),
            (&["Q"][..], "Quit"),
        ];
        let help = KeyBindingDisplay::new(&bindings);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [scene_area, stats_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(stats.width())])
                .areas(main_area);
        frame.render_widget(scene, scene_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use evoflap_engine::{RunSeed, WorldConfig};
    use evoflap_training::params::EvolutionParams;

    use super::*;

    fn app(speed: Speed) -> WatchApp {
        let params = EvolutionParams {
            population_size: 4,
            ..EvolutionParams::default()
        };
        let sim =
            Simulation::new(WorldConfig::default(), params, RunSeed::from_bytes([5; 16])).unwrap();
        WatchApp::new(sim, speed)
    }

    #[test]
    fn test_speed_multipliers() {
        let multipliers = [Speed::Normal, Speed::Double, Speed::Fast, Speed::Max]
            .map(Speed::multiplier);
        assert_eq!(multipliers, [1.0, 2.0, 5.0, 25.0]);
    }

    #[test]
    fn test_speed_keys() {
        assert_eq!(Speed::from_key(KeyCode::Char('5')), Some(Speed::Fast));
        assert_eq!(Speed::from_key(KeyCode::Char('m')), Some(Speed::Max));
        assert_eq!(Speed::from_key(KeyCode::Char('3')), None);
    }

    #[test]
    fn test_tick_rate_follows_speed_and_pause() {
        let mut app = app(Speed::Fast);
        let base = WorldConfig::default().tick_rate();
        assert_eq!(app.tick_rate(), Some(base * 5.0));
        app.is_paused = true;
        assert_eq!(app.tick_rate(), None);
    }

    #[test]
    fn test_stat_rows_show_elite_slots() {
        let app = app(Speed::Normal);
        let elite_slots = app.stat_rows().into_iter().find_map(|row| match row {
            StatRow::LabelValue("Elite slots", value) => Some(value),
            _ => None,
        });
        // 4 agents at the default 4% selection rate
        assert_eq!(elite_slots.as_deref(), Some("0"));
    }

    #[test]
    fn test_stat_rows_grow_after_first_generation() {
        let mut app = app(Speed::Normal);
        let before = app.stat_rows().len();
        app.sim.run_generation();
        assert_eq!(app.stat_rows().len(), before + 3);
    }
}
