pub mod app;
pub mod breakout;
pub mod terminal;
pub mod util;
