pub mod point_commands;
mod required_fields;
pub mod transaction_commands;
