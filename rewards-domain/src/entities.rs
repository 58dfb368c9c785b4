// Domain entities
pub mod history;
pub mod model;
pub mod point_event;
pub mod transaction;

pub use history::*;
pub use model::*;
pub use point_event::*;
pub use transaction::*;
