#![no_std]

extern crate alloc;

pub use board::*;
pub use config::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use loss::*;
pub use mode::*;
pub use types::*;
pub use view::*;

mod board;
mod config;
mod controller;
mod engine;
mod error;
mod generator;
mod loss;
mod mode;
mod types;
mod view;
