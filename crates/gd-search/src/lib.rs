pub mod catalog;
pub mod index;
pub mod slot;

pub use catalog::IconEntry;
pub use index::{SearchConfig, SearchIndex};
pub use slot::{IndexSlot, QuerySequencer, SearchError};
