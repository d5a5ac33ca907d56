//! Repository modules implementing every Registrar operation.
//!
//! Each module adds methods to `RegistrarService` via `impl RegistrarService` blocks.

pub mod enrollment;
pub mod extracurricular;
pub mod gpa;
pub mod ledger;
pub mod registry;
pub mod result;
pub mod student;
