#[macro_use]
extern crate derive_more;

pub mod apple;
pub mod basic;
pub mod error;
pub mod game;
pub mod prefs;
pub mod snake;
pub mod snake_control;
