//! [`PracticeStore`](capkb_core::store::PracticeStore) backends.
//!
//! - [`PgPracticeStore`] -- the `best_practices` table in Postgres.
//! - [`FilePracticeStore`] -- a JSON file, for single-process deployments.

pub mod file;
pub mod pg;

pub use file::FilePracticeStore;
pub use pg::PgPracticeStore;
