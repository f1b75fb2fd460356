//! Core types shared across the Quarterly workspace: company identifiers,
//! per-period financial snapshots, money formatting and error types.

pub mod company;
pub mod errors;
pub mod financials;
pub mod format;

pub use company::*;
pub use errors::*;
pub use financials::*;
pub use format::*;
