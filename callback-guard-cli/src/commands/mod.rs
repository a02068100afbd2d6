//! Command implementations for the callback-guard CLI.

mod purge;
mod release;
mod reserve;

pub use purge::PurgeCommand;
pub use release::ReleaseCommand;
pub use reserve::ReserveCommand;
