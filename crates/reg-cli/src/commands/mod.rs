pub mod dispatch;
pub mod gpa;
pub mod ledger;
pub mod registry;
pub mod result;
pub mod schema;
pub mod seed;
pub mod shared;
pub mod student;
