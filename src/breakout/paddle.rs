use console_engine::Color;

use crate::breakout::algebra_2d::CellBox;
use crate::terminal::renderer::{Renderer, Style};

const PADDLE_HEIGHT: i32 = 1;
/// distance of the paddle row from the bottom edge
const PADDLE_BOTTOM_DISTANCE: i32 = 5;
const PADDLE_STYLE: Style = Style::background(Color::Rgb { r: 0, g: 128, b: 128 });

/// Player controlled paddle. Moves horizontally only.
#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub shape: CellBox,
    pub step: i32,
}

impl Paddle {
    /// Centered horizontally, a few rows above the bottom edge
    pub fn new(screen_w: i32, screen_h: i32, width: i32, step: i32) -> Self {
        assert!(step > 0);
        Self {
            shape: CellBox::new(
                screen_w / 2 - width / 2,
                screen_h - PADDLE_BOTTOM_DISTANCE,
                width,
                PADDLE_HEIGHT,
            ),
            step,
        }
    }

    pub fn move_left(&mut self, renderer: &mut impl Renderer) {
        self.move_by(-self.step, renderer)
    }

    pub fn move_right(&mut self, renderer: &mut impl Renderer) {
        self.move_by(self.step, renderer)
    }

    /// Shift by `delta` cells, clamped to `[0, screen_w - w]`.
    /// The old footprint is cleared and the paddle redrawn at its new place.
    pub fn move_by(&mut self, delta: i32, renderer: &mut impl Renderer) {
        let (screen_w, _) = renderer.size();
        let max_x = (screen_w - self.shape.w()).max(0);
        self.clear(renderer);
        self.shape = self.shape.with_x((self.shape.x() + delta).clamp(0, max_x));
        self.draw(renderer);
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.fill(&self.shape, ' ', PADDLE_STYLE);
    }

    pub fn clear(&self, renderer: &mut impl Renderer) {
        renderer.fill(&self.shape, ' ', Style::default());
    }
}
