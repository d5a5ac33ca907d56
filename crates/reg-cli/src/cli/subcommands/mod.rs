mod gpa;
mod ledger;
mod registry;
mod result;
mod schema;
mod student;

pub use gpa::GpaCommands;
pub use ledger::LedgerCommands;
pub use registry::{RecordKind, RegistryCommands};
pub use result::ResultCommands;
pub use schema::SchemaEntity;
pub use student::StudentCommands;
