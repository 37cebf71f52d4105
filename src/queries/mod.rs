//! Query modules.
//!
//! Each module provides a query struct that borrows a
//! [`Catalog`](crate::catalog::Catalog) and returns typed results.

pub mod candidates;
pub mod variants;

pub use candidates::CandidateQuery;
pub use variants::VariantQuery;
