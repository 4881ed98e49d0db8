//! Materialized view DDL statement builders
//!
//! - CREATE MATERIALIZED VIEW: [`CreateMaterializedViewStatement`]
//! - DROP MATERIALIZED VIEW: [`DropMaterializedViewStatement`]

mod create_materialized_view;
mod drop_materialized_view;

pub use create_materialized_view::*;
pub use drop_materialized_view::*;
