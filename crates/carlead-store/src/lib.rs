pub mod error;
pub mod migrate;
pub mod paths;
pub mod records;
pub mod slot;

pub use records::{ImportOutcome, RecordStore};
pub use slot::{Slot, SqliteSlot};
