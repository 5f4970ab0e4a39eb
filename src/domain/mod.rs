mod cash;
mod credit_card;
mod debit_card;
mod expense;
mod income;
mod input;
mod ledger;
mod money;
mod record;
mod transaction;
mod user;

pub use cash::*;
pub use credit_card::*;
pub use debit_card::*;
pub use expense::*;
pub use income::*;
pub use input::*;
pub use ledger::*;
pub use money::*;
pub use record::{
    Collection, IdsExhausted, ParseKindError, Record, RecordId, RecordKind, RecordNotFound,
};
pub use transaction::*;
pub use user::*;
