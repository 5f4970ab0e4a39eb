// Application layer - orchestration between the ledger, its data provider
// and whatever front end drives it.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
