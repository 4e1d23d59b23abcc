//! Core use-case services.
//!
//! # Responsibility
//! - `lifecycle_service`: draft, countdown, and note collections.
//! - `burn_book`: the session controller that routes input events into the
//!   lifecycle and disposal state machines and drives the presenter.

pub mod burn_book;
pub mod lifecycle_service;
