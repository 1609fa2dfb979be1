//! Row types for the database tables.

pub mod practice;
