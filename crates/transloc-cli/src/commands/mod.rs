//! Command implementations.

mod chain;
mod check;
mod read;

pub use chain::ChainCommand;
pub use check::CheckCommand;
pub use read::ReadCommand;
