use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

#[derive(Debug, Clone)]
pub enum StatRow {
    Empty,
    LabelValue(&'static str, String),
}

/// Two-column table of labelled values.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    rows: Vec<StatRow>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(rows: Vec<StatRow>) -> Self {
        Self { rows, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        26 + super::block_horizontal_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let row_areas =
            Layout::vertical((0..self.rows.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(self.rows, row_areas.iter().copied()) {
            match row {
                StatRow::Empty => {}
                StatRow::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value, style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
