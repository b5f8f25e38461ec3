//! FOLIO Application Library
//!
//! Book catalog and review service: application modules (books, reviews,
//! auth) and shared utilities, assembled onto the FOLIO kernel.

pub mod modules;
pub mod utils;

#[cfg(test)]
mod tests;
