use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// An interactive application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the loop starts. Configure the tick rate and render
    /// mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles key presses, resizes, and other terminal events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances the application by one tick.
    ///
    /// Called once per elapsed tick interval, possibly several times in a row
    /// when catching up.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}
