//! Request extractors for caller identity.
//!
//! - [`identity::Student`] -- The named student making a change (required).
//! - [`identity::Requester`] -- Optional student plus admin-key check, for deletes.

pub mod identity;
