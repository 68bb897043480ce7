use console_engine::Color;
use itertools::Itertools;
use rand::Rng;

use crate::breakout::algebra_2d::CellBox;
use crate::breakout::config::RoundConfig;
use crate::breakout::error::BreakoutError;
use crate::terminal::renderer::{Renderer, Style};

/// Block colors. Purely cosmetic.
pub const BLOCK_PALETTE: [Color; 5] = [
    Color::Rgb { r: 46, g: 134, b: 171 },
    Color::Rgb { r: 162, g: 59, b: 114 },
    Color::Rgb { r: 241, g: 143, b: 1 },
    Color::Rgb { r: 199, g: 62, b: 29 },
    Color::Rgb { r: 59, g: 31, b: 43 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: i32,
    pub cols: i32,
    pub block_width: i32,
    pub block_height: i32,
    pub margin_x: i32,
    pub margin_y: i32,
}

impl GridLayout {
    /// Saturates at `i32::MAX`, which no screen fits
    pub fn grid_width(&self) -> i32 {
        self.cols.saturating_mul(self.block_width.saturating_add(self.margin_x))
    }

    /// Saturates at `i32::MAX`, which no screen fits
    pub fn grid_height(&self) -> i32 {
        self.rows.saturating_mul(self.block_height.saturating_add(self.margin_y))
    }

    fn check(&self) -> Result<(), BreakoutError> {
        let sizes_ok = self.rows > 0 && self.cols > 0 && self.block_width > 0 && self.block_height > 0;
        let margins_ok = self.margin_x >= 0 && self.margin_y >= 0;
        match sizes_ok && margins_ok {
            true => Ok(()),
            false => Err(BreakoutError::InvalidConfig(format!("degenerate grid layout: {self:?}"))),
        }
    }
}

impl From<&RoundConfig> for GridLayout {
    fn from(config: &RoundConfig) -> Self {
        GridLayout {
            rows: config.grid_rows,
            cols: config.grid_cols,
            block_width: config.block_width,
            block_height: config.block_height,
            margin_x: config.block_margin_x,
            margin_y: config.block_margin_y,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub shape: CellBox,
    pub style: Style,
    destroyed: bool,
}

impl Block {
    pub fn new(shape: CellBox, style: Style) -> Self {
        Self { shape, style, destroyed: false }
    }

    pub fn is_destroyed(&self) -> bool { self.destroyed }

    /// Irreversible
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// rows×cols blocks, stored row-major. The shape never changes after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct DestructibleGrid {
    rows: usize,
    cols: usize,
    blocks: Vec<Block>,
}

impl DestructibleGrid {
    /// Lays out the blocks left-to-right, top-to-bottom, horizontally centered, starting at the top row
    pub fn new(
        layout: &GridLayout,
        (screen_w, screen_h): (i32, i32),
        rng: &mut impl Rng,
    ) -> Result<Self, BreakoutError> {
        layout.check()?;
        let grid_width = layout.grid_width();
        let grid_height = layout.grid_height();
        if grid_width > screen_w || grid_height >= screen_h {
            return Err(BreakoutError::LayoutOverflow {
                grid_width,
                grid_height,
                screen_width: screen_w,
                screen_height: screen_h,
            });
        }

        let left_x = screen_w / 2 - grid_width / 2;
        let top_y = 0;
        let blocks = (0..layout.rows)
            .cartesian_product(0..layout.cols)
            .map(|(row, col)| {
                let color = BLOCK_PALETTE[rng.gen_range(0..BLOCK_PALETTE.len())];
                Block::new(
                    CellBox::new(
                        left_x + col * (layout.block_width + layout.margin_x),
                        top_y + row * (layout.block_height + layout.margin_y),
                        layout.block_width,
                        layout.block_height,
                    ),
                    Style::background(color),
                )
            })
            .collect::<Vec<_>>();

        log::debug!("grid of {} blocks at x={left_x}, {grid_width}x{grid_height} cells", blocks.len());
        Ok(Self {
            rows: layout.rows as usize,
            cols: layout.cols as usize,
            blocks,
        })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn len(&self) -> usize { self.blocks.len() }

    pub fn is_empty(&self) -> bool { self.blocks.is_empty() }

    pub fn block(&self, row: usize, col: usize) -> &Block {
        &self.blocks[row * self.cols + col]
    }

    /// Row-major
    pub fn blocks(&self) -> impl Iterator<Item=&Block> {
        self.blocks.iter()
    }

    pub fn blocks_mut(&mut self) -> impl Iterator<Item=&mut Block> {
        self.blocks.iter_mut()
    }

    pub fn remaining(&self) -> usize {
        self.blocks.iter().filter(|b| !b.destroyed).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.blocks.iter().all(|b| b.destroyed)
    }

    /// Destroys the first live block (row-major) overlapping `shape` and clears it from the screen.
    /// Returns its (row, col). At most one block is destroyed per call.
    pub fn strike(&mut self, shape: &CellBox, renderer: &mut impl Renderer) -> Option<(usize, usize)> {
        let idx = self.blocks.iter()
            .position(|b| !b.destroyed && b.shape.intersects(shape))?;
        let block = &mut self.blocks[idx];
        block.destroy();
        renderer.fill(&block.shape, ' ', Style::default());
        Some((idx / self.cols, idx % self.cols))
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        for block in self.blocks.iter().filter(|b| !b.destroyed) {
            renderer.fill(&block.shape, ' ', block.style);
        }
    }
}
