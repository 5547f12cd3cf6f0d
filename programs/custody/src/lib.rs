//! Custody primitives shared by the escrow and vault programs.
//!
//! - [`derivation`]: program-derived addresses, derived then compared.
//! - [`native`]: lamport transfers through the system program.
//! - [`token`]: checked token transfers and token account closing.
//! - [`accounts`]: create, load and close program-owned metadata accounts.

pub mod accounts;
pub mod derivation;
pub mod errors;
pub mod native;
pub mod token;

pub use errors::CustodyError;
