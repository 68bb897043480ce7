pub mod algebra_2d;
pub mod config;
pub mod error;
pub mod grid;
pub mod mechanics;
pub mod paddle;
pub mod projectile;
