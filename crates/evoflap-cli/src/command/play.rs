use crossterm::event::{Event, KeyCode};
use evoflap_runtime::{App, RenderMode, Runtime};
use evoflap_training::manual::{ManualGame, ManualTick};
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

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    run: RunArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { run } = arg;
    let config = run.load_config()?;
    let game = ManualGame::new(config.world, run.seed())?;
    let mut app = PlayApp::new(game);
    Runtime::new().run(&mut app)?;
    Ok(())
}

#[derive(Debug)]
struct PlayApp {
    game: ManualGame,
    last_score: Option<u32>,
    is_paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    fn new(game: ManualGame) -> Self {
        Self {
            game,
            last_score: None,
            is_paused: false,
            is_exiting: false,
        }
    }

    fn tick_rate(&self) -> Option<f64> {
        (!self.is_paused).then(|| self.game.course().world().tick_rate())
    }

    fn stat_rows(&self) -> Vec<StatRow> {
        let last_score = self
            .last_score
            .map_or_else(|| "-".to_owned(), |score| score.to_string());
        vec![
            StatRow::LabelValue("Score", self.game.score().to_string()),
            StatRow::LabelValue("High score", self.game.high_score().to_string()),
            StatRow::Empty,
            StatRow::LabelValue("Attempt", self.game.attempts().to_string()),
            StatRow::LabelValue("Last score", last_score),
        ]
    }
}

impl App for PlayApp {
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
        let is_playing = !self.is_paused;
        match event.code {
            KeyCode::Char(' ') | KeyCode::Up if is_playing => self.game.jump(),
            KeyCode::Char('p') => self.is_paused = !self.is_paused,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
        runtime.set_tick_rate(self.tick_rate());
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        if let ManualTick::Crashed { score } = self.game.tick() {
            self.last_score = Some(score);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let (title, border_style) = if self.is_paused {
            (" evoflap (paused) ", style::PAUSED_BORDER)
        } else {
            (" evoflap ", style::RUNNING_BORDER)
        };
        let scene = SceneDisplay::new(self.game.course())
            .birds([self.game.agent().y()])
            .block(
                BlockWidget::bordered()
                    .title(Line::from(title).centered())
                    .border_style(border_style),
            );
        let stats = StatsDisplay::new(self.stat_rows())
            .block(BlockWidget::bordered().title(Line::from(" Game ").centered()));

        let bindings = if self.is_paused {
            vec![(&["P"][..], "Resume"), (&["Q"][..], "Quit")]
        } else {
            vec![
                (&["Space", "↑"][..], "Jump"),
                (&["P"][..], "Pause"),
                (&["Q"][..], "Quit"),
            ]
        };
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
    use crossterm::event::{KeyEvent, KeyModifiers};
    use evoflap_engine::{RunSeed, WorldConfig};

    use super::*;

    fn app() -> PlayApp {
        let game = ManualGame::new(WorldConfig::default(), RunSeed::from_bytes([4; 16])).unwrap();
        PlayApp::new(game)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_crash_records_last_score() {
        let mut app = app();
        let mut runtime = Runtime::new();
        for _ in 0..10_000 {
            app.update(&mut runtime);
            if app.last_score.is_some() {
                break;
            }
        }
        assert!(app.last_score.is_some());
        assert_eq!(app.game.score(), 0);
        assert_eq!(app.game.attempts(), 2);
    }

    #[test]
    fn test_pause_ignores_jump() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, key(KeyCode::Char('p')));
        assert!(app.is_paused);
        assert_eq!(app.tick_rate(), None);

        app.handle_event(&mut runtime, key(KeyCode::Char(' ')));
        assert!(app.game.agent().velocity().abs() < f64::EPSILON);

        app.handle_event(&mut runtime, key(KeyCode::Char('p')));
        app.handle_event(&mut runtime, key(KeyCode::Up));
        assert!(app.game.agent().velocity() < 0.0);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.handle_event(&mut runtime, key(KeyCode::Esc));
        assert!(app.should_exit());
    }
}
