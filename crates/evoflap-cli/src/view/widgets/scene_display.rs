use evoflap_engine::{ObstacleCourse, WorldConfig};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

const BIRD_SYMBOL: &str = "●";
const PIPE_SYMBOL: &str = "█";

/// Obstacle course and birds, scaled to fit the widget area.
#[derive(Debug)]
pub struct SceneDisplay<'a> {
    course: &'a ObstacleCourse,
    birds: Vec<f64>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SceneDisplay<'a> {
    pub fn new(course: &'a ObstacleCourse) -> Self {
        Self {
            course,
            birds: vec![],
            block: None,
        }
    }

    /// Vertical positions of the birds to draw; all share `bird_x`.
    pub fn birds<I>(self, birds: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            birds: birds.into_iter().collect(),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

/// Maps scene coordinates onto terminal cells.
#[derive(Debug, Clone, Copy)]
struct CellScale {
    area: Rect,
    scene_width: f64,
    scene_height: f64,
}

impl CellScale {
    fn new(area: Rect, world: &WorldConfig) -> Self {
        Self {
            area,
            scene_width: world.scene_width,
            scene_height: world.game_height,
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn column(&self, x: f64) -> Option<u16> {
        let col = (x / self.scene_width * f64::from(self.area.width)).floor();
        (col >= 0.0 && col < f64::from(self.area.width)).then(|| self.area.x + col as u16)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn row(&self, y: f64) -> u16 {
        let max_row = f64::from(self.area.height.saturating_sub(1));
        let row = (y / self.scene_height * f64::from(self.area.height))
            .floor()
            .clamp(0.0, max_row);
        self.area.y + row as u16
    }

    /// Columns covered by the horizontal span `[x, x + width)`, clipped to the area.
    fn columns(&self, x: f64, width: f64) -> impl Iterator<Item = u16> {
        let left = self.column(x.max(0.0));
        let right = self.column((x + width).min(self.scene_width) - f64::EPSILON);
        left.zip(right)
            .into_iter()
            .flat_map(|(left, right)| left..=right)
    }
}

impl Widget for SceneDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        if area.is_empty() {
            return;
        }
        buf.set_style(area, style::SKY);

        let world = self.course.world();
        let scale = CellScale::new(area, world);

        for obstacle in self.course.obstacles() {
            let upper = obstacle.upper_rect(world);
            let lower = obstacle.lower_rect(world);
            // rows strictly inside the gap stay empty
            let gap_top = scale.row(upper.bottom());
            let gap_bottom = scale.row(lower.y);
            for col in scale.columns(obstacle.x(), world.pipe_width) {
                for row in area.top()..area.bottom() {
                    if gap_top < row && row < gap_bottom {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((col, row)) {
                        cell.set_symbol(PIPE_SYMBOL).set_style(style::PIPE);
                    }
                }
            }
        }

        let Some(col) = scale.column(world.bird_x) else {
            return;
        };
        for y in self.birds {
            if let Some(cell) = buf.cell_mut((col, scale.row(y))) {
                cell.set_symbol(BIRD_SYMBOL).set_style(style::BIRD);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn scale(width: u16, height: u16) -> CellScale {
        CellScale::new(Rect::new(0, 0, width, height), &WorldConfig::default())
    }

    #[test]
    fn test_scale_maps_scene_to_cells() {
        let scale = scale(60, 34);
        assert_eq!(scale.column(0.0), Some(0));
        assert_eq!(scale.column(100.0), Some(10));
        assert_eq!(scale.column(600.0), None);
        assert_eq!(scale.column(-1.0), None);
        assert_eq!(scale.row(0.0), 0);
        assert_eq!(scale.row(340.0), 17);
        assert_eq!(scale.row(10_000.0), 33);
        assert_eq!(scale.row(-50.0), 0);
    }

    #[test]
    fn test_columns_are_clipped() {
        let scale = scale(60, 34);
        assert_eq!(scale.columns(580.0, 60.0).collect::<Vec<_>>(), vec![58, 59]);
        assert_eq!(scale.columns(-30.0, 60.0).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(scale.columns(700.0, 60.0).count(), 0);
    }

    #[test]
    fn test_bird_is_drawn() {
        let world = WorldConfig::default();
        let course = ObstacleCourse::new(world.clone(), &mut Pcg32::seed_from_u64(0));
        let area = Rect::new(0, 0, 60, 34);
        let mut buf = Buffer::empty(area);
        SceneDisplay::new(&course)
            .birds([world.bird_start_y])
            .render(area, &mut buf);
        assert_eq!(buf[(10, 15)].symbol(), BIRD_SYMBOL);
    }
}
