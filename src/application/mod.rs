//! Application layer
//!
//! Use cases that orchestrate domain logic to implement the service's
//! workflows. Each use case coordinates the domain service and converts
//! between edge payloads and domain types.

pub mod invoice;
