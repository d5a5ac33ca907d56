//! # reg-core
//!
//! Core types, semester and grade arithmetic, and error types for Registrar.
//!
//! This crate provides the foundational types shared across all Registrar crates:
//! - Entity structs for the student record and the flat registries
//! - Semester labels with explicit numeric ordering
//! - Grade points and the credit-weighted GPA accumulator
//! - Store key layout helpers
//! - The role capability trait injected into the service layer
//! - Cross-cutting error types and response shapes

pub mod args;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod gpa;
pub mod grade;
pub mod identity;
pub mod keys;
pub mod responses;
pub mod semester;
