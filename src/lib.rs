// media-xform library
// Transformation string compiler and request signing

pub mod config;
pub mod constants;
pub mod delivery;
pub mod error;
pub mod logging;
pub mod signing;
pub mod transformation;

pub use delivery::DeliveryPath;
pub use error::{Result, TransformError};
pub use signing::Signer;
pub use transformation::{Action, Transformation};
