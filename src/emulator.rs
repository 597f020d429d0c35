//! The interpreter and the devices it drives.

pub mod config;
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod instruction;
pub mod keypad;

pub use config::{Config, JumpQuirk};
pub use emulator::Emulator;
pub use error::{ExecutionError, LoadError};
pub use framebuffer::Framebuffer;
