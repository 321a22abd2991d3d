//! Subcommand handlers

pub mod operate;
pub mod utils;
pub mod validate;

pub use operate::handle_operate;
pub use validate::handle_validate;
