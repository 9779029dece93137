//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod roster_command;
mod roster_query;
mod roster_store;

#[cfg(test)]
pub use roster_command::MockRosterCommand;
pub use roster_command::{
    AssignStudentRequest, CreateLecturerRequest, FixtureRosterCommand, RosterCommand,
};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::{FixtureRosterQuery, RosterQuery};
#[cfg(test)]
pub use roster_store::{MockRosterStore, MockRosterTransaction};
pub use roster_store::{RosterStore, RosterStoreError, RosterTransaction, TransactionMode};
