//! SeaORM entities
//!
//! Database row models. Domain code works with `domain::entities` instead;
//! adapters convert between the two.

pub mod domain_blocks;
