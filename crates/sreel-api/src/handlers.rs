//! Request handlers.

pub mod health;
pub mod ideas;
pub mod storyboard;

pub use health::*;
pub use ideas::*;
pub use storyboard::*;
