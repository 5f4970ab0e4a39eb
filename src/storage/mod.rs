mod provider;
mod snapshot;

pub use provider::*;
pub use snapshot::*;
