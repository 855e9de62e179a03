use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{key_binding_display::*, scene_display::*, stats_display::*};

mod key_binding_display;
mod scene_display;
mod stats_display;

pub mod style {
    use ratatui::style::{Color, Style};

    pub const DEFAULT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const SKY: Style = Style::new().bg(Color::Black);
    pub const PIPE: Style = Style::new().fg(Color::Green).bg(Color::Black);
    pub const BIRD: Style = Style::new().fg(Color::Yellow).bg(Color::Black);
    pub const PAUSED_BORDER: Style = Style::new().fg(Color::Yellow);
    pub const RUNNING_BORDER: Style = Style::new().fg(Color::White);
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
