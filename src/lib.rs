//! Rescisão Engine library crate.
//!
//! This crate exposes a Brazilian labor-severance ("rescisão
//! trabalhista") calculator and the API components around it as
//! reusable modules.  External applications may depend on the
//! `rescisao_engine` crate and call into `engine::compute` directly or
//! embed the API via `api::build_router`.

pub mod models;
pub mod error;
pub mod rules;
pub mod period;
pub mod engine;
pub mod validation;
pub mod config;
pub mod api;

pub use engine::{compute, compute_batch};
pub use error::InvalidInputError;
