use console_engine::pixel;
use console_engine::pixel::Pixel;
use console_engine::screen::Screen;
use console_engine::{Color, ConsoleEngine};

use crate::breakout::algebra_2d::CellBox;
use crate::breakout::error::BreakoutError;

/// Frame rate hint for the console engine. We pace frames ourselves.
const ENGINE_TARGET_FPS: u32 = 30;

pub const BACKGROUND: Color = Color::Rgb { r: 0, g: 0, b: 0 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    pub const fn background(bg: Color) -> Self {
        Self { fg: Color::White, bg }
    }

    pub const fn foreground(fg: Color) -> Self {
        Self { fg, bg: BACKGROUND }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::background(BACKGROUND)
    }
}

/// Cell based render surface
pub trait Renderer {
    /// (width, height) in cells
    fn size(&self) -> (i32, i32);

    /// Paint one cell. Cells outside the surface are ignored.
    fn paint(&mut self, x: i32, y: i32, glyph: char, style: Style);

    /// Show everything painted since the last frame
    fn present(&mut self);

    /// Resynchronize the surface with the display, e.g. after a terminal resize
    fn sync(&mut self);

    /// Release the surface. Painting afterwards has no effect.
    fn close(&mut self);

    fn fill(&mut self, area: &CellBox, glyph: char, style: Style) {
        let b = area.bounds();
        for y in b.y0..b.y1 {
            for x in b.x0..b.x1 {
                self.paint(x, y, glyph, style);
            }
        }
    }

    fn print(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.paint(x + i as i32, y, ch, style);
        }
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn size(&self) -> (i32, i32) { (**self).size() }
    fn paint(&mut self, x: i32, y: i32, glyph: char, style: Style) { (**self).paint(x, y, glyph, style) }
    fn present(&mut self) { (**self).present() }
    fn sync(&mut self) { (**self).sync() }
    fn close(&mut self) { (**self).close() }
}

fn in_surface(x: i32, y: i32, (width, height): (i32, i32)) -> bool {
    x >= 0 && y >= 0 && x < width && y < height
}

fn to_pixel(glyph: char, style: Style) -> Pixel {
    pixel::pxl_fbg(glyph, style.fg, style.bg)
}

/// Terminal surface backed by a full-screen [ConsoleEngine].
/// Dropping the engine restores the terminal.
pub struct TerminalRenderer {
    engine: Option<ConsoleEngine>,
}

impl TerminalRenderer {
    pub fn init() -> Result<Self, BreakoutError> {
        let engine = ConsoleEngine::init_fill(ENGINE_TARGET_FPS)
            .map_err(|e| BreakoutError::RendererInitFailure(e.to_string()))?;
        log::debug!("terminal initialised: {}x{}", engine.get_width(), engine.get_height());
        Ok(Self { engine: Some(engine) })
    }
}

impl Renderer for TerminalRenderer {
    fn size(&self) -> (i32, i32) {
        match &self.engine {
            Some(engine) => (engine.get_width() as i32, engine.get_height() as i32),
            None => (0, 0),
        }
    }

    fn paint(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        let size = self.size();
        if let Some(engine) = self.engine.as_mut() {
            if in_surface(x, y, size) {
                engine.set_pxl(x, y, to_pixel(glyph, style));
            }
        }
    }

    fn present(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.draw();
        }
    }

    fn sync(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.check_resize();
            engine.draw();
        }
    }

    fn close(&mut self) {
        if self.engine.take().is_some() {
            log::debug!("terminal released");
        }
    }
}

/// In-memory surface. Used for headless runs and tests.
pub struct ScreenRenderer {
    screen: Screen,
    width: i32,
    height: i32,
    frames_presented: usize,
    syncs: usize,
    closed: bool,
}

impl ScreenRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut screen = Screen::new_empty(width, height);
        screen.clear();
        Self {
            screen,
            width: width as i32,
            height: height as i32,
            frames_presented: 0,
            syncs: 0,
            closed: false,
        }
    }

    pub fn glyph_at(&self, x: i32, y: i32) -> Option<char> {
        self.pixel_at(x, y).map(|p| p.chr)
    }

    pub fn background_at(&self, x: i32, y: i32) -> Option<Color> {
        self.pixel_at(x, y).map(|p| p.bg)
    }

    /// Text of one screen row
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .map(|x| self.glyph_at(x, y).unwrap_or(' '))
            .collect()
    }

    pub fn frames_presented(&self) -> usize { self.frames_presented }
    pub fn syncs(&self) -> usize { self.syncs }
    pub fn is_closed(&self) -> bool { self.closed }

    fn pixel_at(&self, x: i32, y: i32) -> Option<Pixel> {
        if !in_surface(x, y, (self.width, self.height)) {
            return None;
        }
        self.screen.get_pxl(x, y).ok()
    }
}

impl Renderer for ScreenRenderer {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn paint(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        if !self.closed && in_surface(x, y, (self.width, self.height)) {
            self.screen.set_pxl(x, y, to_pixel(glyph, style));
        }
    }

    fn present(&mut self) {
        if !self.closed {
            self.frames_presented += 1;
        }
    }

    fn sync(&mut self) {
        self.syncs += 1;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::Rgb { r: 200, g: 0, b: 0 };

    #[test]
    fn fill_paints_the_whole_box() {
        let mut r = ScreenRenderer::new(10, 5);
        r.fill(&CellBox::new(2, 1, 3, 2), '#', Style::background(RED));
        for y in 1..3 {
            for x in 2..5 {
                assert_eq!(r.glyph_at(x, y), Some('#'));
                assert_eq!(r.background_at(x, y), Some(RED));
            }
        }
        assert_ne!(r.glyph_at(5, 1), Some('#'));
        assert_ne!(r.glyph_at(2, 3), Some('#'));
    }

    #[test]
    fn painting_outside_is_ignored() {
        let mut r = ScreenRenderer::new(4, 4);
        r.fill(&CellBox::new(-2, -2, 3, 3), 'x', Style::default());
        assert_eq!(r.glyph_at(0, 0), Some('x'));
        assert_eq!(r.glyph_at(-1, 0), None);
        assert_ne!(r.glyph_at(1, 0), Some('x'));
    }

    #[test]
    fn print_writes_a_row() {
        let mut r = ScreenRenderer::new(12, 2);
        r.print(1, 1, "LOSER", Style::foreground(RED));
        assert_eq!(r.row_text(1), " LOSER      ");
    }

    #[test]
    fn closed_surface_ignores_paint_and_present() {
        let mut r = ScreenRenderer::new(4, 4);
        r.close();
        r.paint(0, 0, 'x', Style::default());
        r.present();
        assert!(r.is_closed());
        assert_ne!(r.glyph_at(0, 0), Some('x'));
        assert_eq!(r.frames_presented(), 0);
    }

    fn draw_dot(mut r: impl Renderer) {
        r.paint(1, 1, 'o', Style::default());
        r.present();
    }

    #[test]
    fn borrowed_renderer_forwards_calls() {
        let mut r = ScreenRenderer::new(4, 4);
        draw_dot(&mut r);
        assert_eq!(r.glyph_at(1, 1), Some('o'));
        assert_eq!(r.frames_presented(), 1);
    }
}
