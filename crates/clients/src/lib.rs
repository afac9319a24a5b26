//! Clients domain module.
//!
//! This crate contains the client record and its business rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod client;

pub use client::{Client, ClientDraft, ClientPatch, NationalId};
