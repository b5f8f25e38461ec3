//! View-layer state container for FOLIO clients.
//!
//! Replaces the ambient global store of earlier clients with an explicit
//! [`state::StoreState`] value owned by the view layer. Mutations are pure
//! transition functions consuming typed server responses ([`dto`]); HTTP
//! happens outside this crate.

pub mod dto;
pub mod state;

pub use state::{Notification, StoreState};
