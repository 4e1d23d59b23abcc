//! Flutter bridge for the BurnBook core.

pub mod api;
