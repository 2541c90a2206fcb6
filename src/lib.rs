pub mod ai;
pub mod animation;
pub mod character;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod error;
pub mod level;
pub mod screen;
pub mod sprites;
