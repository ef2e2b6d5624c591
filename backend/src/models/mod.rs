pub mod event;
pub mod window;

pub use event::*;
pub use window::*;
