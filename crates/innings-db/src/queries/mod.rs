//! Query functions, one module per table.

pub mod opportunities;
pub mod roadmaps;
