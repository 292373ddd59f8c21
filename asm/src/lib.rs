pub mod clean;
pub mod config;
pub mod dump;
pub mod encode;
pub mod error;
pub mod msg;
pub mod operand;
pub mod pseudo;
pub mod scanner;
pub mod table;

pub use scanner::{assemble, Program};
