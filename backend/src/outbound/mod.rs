//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **box_office**: `reqwest` client for the external box-office API
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod box_office;
pub mod persistence;
