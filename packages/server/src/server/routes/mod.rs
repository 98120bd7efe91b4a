// HTTP routes
pub mod classify;
pub mod health;
pub mod verify;

pub use classify::*;
pub use health::*;
pub use verify::*;
