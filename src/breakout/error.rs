use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakoutError {
    /// The block grid does not fit on the screen
    LayoutOverflow {
        grid_width: i32,
        grid_height: i32,
        screen_width: i32,
        screen_height: i32,
    },
    /// The render surface could not be acquired
    RendererInitFailure(String),
    InvalidConfig(String),
}

impl Display for BreakoutError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            BreakoutError::LayoutOverflow { grid_width, grid_height, screen_width, screen_height } => write!(
                f,
                "grid of {grid_width}x{grid_height} cells is out of bounds of the {screen_width}x{screen_height} screen"
            ),
            BreakoutError::RendererInitFailure(msg) => write!(f, "could not initialise the terminal: {msg}"),
            BreakoutError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for BreakoutError {}
