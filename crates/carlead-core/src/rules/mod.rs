pub mod bucket;
pub mod factory;
pub mod log;
pub mod patch;
pub mod view;

pub use bucket::{classify_date, DateBucket, DateClass};
pub use factory::{normalize, ContactInput};
pub use log::{apply_interaction, InteractionEntry};
pub use patch::{apply_patch, ContactPatch};
pub use view::{view, StatusFilter, ViewQuery};
