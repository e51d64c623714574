pub mod contact;
pub mod ids;
pub mod interaction;
pub mod status;
pub mod vehicle;

pub use contact::Contact;
pub use ids::{ContactId, InteractionId};
pub use interaction::{Interaction, InteractionKind, SUGGESTED_OUTCOMES};
pub use status::Status;
pub use vehicle::{VehicleBrand, VehicleModel, VehicleSelection, VehicleTaxonomy};
