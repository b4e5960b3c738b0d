//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `normalize`: Canonical domain form and the local-domain exception
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod normalize;
pub mod ports;
