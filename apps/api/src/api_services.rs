mod database;
mod state_builder;

pub use database::{connect, run_migrations};
#[cfg(test)]
pub use state_builder::in_memory_ports;
pub use state_builder::{build_app_state, postgres_ports};
