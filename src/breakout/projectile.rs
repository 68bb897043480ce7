use console_engine::Color;

use crate::breakout::algebra_2d::{CellBox, Velocity};
use crate::terminal::renderer::{Renderer, Style};

const PROJECTILE_WIDTH: i32 = 2;
const PROJECTILE_HEIGHT: i32 = 1;
const PROJECTILE_STYLE: Style = Style::background(Color::Rgb { r: 128, g: 128, b: 128 });

/// The ball. We're in space - no gravity, no spin, constant speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub shape: CellBox,
    pub velocity: Velocity,
}

impl Projectile {
    /// Horizontally centered, slightly below the vertical center
    pub fn new(screen_w: i32, screen_h: i32, velocity: Velocity) -> Self {
        Self {
            shape: CellBox::new(
                screen_w / 2,
                screen_h / 2 + 2 * PROJECTILE_WIDTH,
                PROJECTILE_WIDTH,
                PROJECTILE_HEIGHT,
            ),
            velocity,
        }
    }

    pub fn collides_with(&self, other: &CellBox) -> bool {
        self.shape.intersects(other)
    }

    /// One tick: bounce off screen edges, then advance.
    ///
    /// Top/bottom and left/right reflections are applied independently,
    /// so hitting a corner reverses both components.
    pub fn update(&mut self, renderer: &mut impl Renderer) {
        let (screen_w, screen_h) = renderer.size();
        self.clear(renderer);
        if self.shape.touches_top() || self.shape.touches_bottom(screen_h) {
            self.velocity.reflect_vertical();
        }
        if self.shape.touches_left() || self.shape.touches_right(screen_w) {
            self.velocity.reflect_horizontal();
        }
        let (dx, dy) = self.velocity.displacement();
        self.shape = self.shape.translate(dx, dy);
        self.draw(renderer);
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.fill(&self.shape, ' ', PROJECTILE_STYLE);
    }

    pub fn clear(&self, renderer: &mut impl Renderer) {
        renderer.fill(&self.shape, ' ', Style::default());
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_4, PI};

    use rstest::rstest;

    use crate::terminal::renderer::ScreenRenderer;

    use super::*;

    fn projectile_at(x: i32, y: i32, direction: f64) -> Projectile {
        Projectile {
            shape: CellBox::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            velocity: Velocity::new(direction, 1.0),
        }
    }

    #[test]
    fn starts_below_center() {
        let p = Projectile::new(120, 40, Velocity::new(FRAC_PI_4, 1.0));
        assert_eq!(p.shape, CellBox::new(60, 24, 2, 1));
    }

    #[rstest]
    // free flight
    #[case((20, 5), FRAC_PI_4, (21, 4), FRAC_PI_4)]
    #[case((20, 5), 3.0 * FRAC_PI_4, (19, 4), 3.0 * FRAC_PI_4)]
    // ceiling: up-right becomes down-right
    #[case((20, 0), FRAC_PI_4, (21, 1), 7.0 * FRAC_PI_4)]
    // floor: down-left becomes up-left
    #[case((20, 9), 5.0 * FRAC_PI_4, (19, 8), 3.0 * FRAC_PI_4)]
    // left wall: up-left becomes up-right
    #[case((0, 5), 3.0 * FRAC_PI_4, (1, 4), FRAC_PI_4)]
    // right wall: down-right becomes down-left
    #[case((38, 5), 7.0 * FRAC_PI_4, (37, 6), 5.0 * FRAC_PI_4)]
    // top left corner: both reflections apply
    #[case((0, 0), 3.0 * FRAC_PI_4, (1, 1), 7.0 * FRAC_PI_4)]
    fn update_reflects_and_advances(
        #[case] start: (i32, i32),
        #[case] direction: f64,
        #[case] expected_pos: (i32, i32),
        #[case] expected_direction: f64,
    ) {
        let mut renderer = ScreenRenderer::new(40, 10);
        let mut p = projectile_at(start.0, start.1, direction);
        p.update(&mut renderer);
        assert_eq!((p.shape.x(), p.shape.y()), expected_pos);
        assert!((p.velocity.direction() - expected_direction).abs() < 1e-9,
                "direction {} expected {}", p.velocity.direction(), expected_direction);
    }

    #[test]
    fn update_moves_the_footprint() {
        let mut renderer = ScreenRenderer::new(40, 10);
        let mut p = projectile_at(10, 5, PI);
        p.draw(&mut renderer);
        p.update(&mut renderer);
        assert_eq!(p.shape.x(), 9);
        assert_eq!(renderer.background_at(9, 5), Some(PROJECTILE_STYLE.bg));
        assert_eq!(renderer.background_at(10, 5), Some(PROJECTILE_STYLE.bg));
        assert_eq!(renderer.background_at(11, 5), Some(Style::default().bg));
    }

    #[test]
    fn collision_needs_real_overlap() {
        let p = projectile_at(10, 5, FRAC_PI_4);
        assert!(p.collides_with(&CellBox::new(11, 5, 4, 1)));
        assert!(!p.collides_with(&CellBox::new(12, 5, 4, 1)));
        assert!(!p.collides_with(&CellBox::new(10, 6, 4, 1)));
    }
}
