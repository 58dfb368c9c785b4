// Domain value objects
pub mod date_window;
pub mod history_kind;

pub use date_window::*;
pub use history_kind::*;
