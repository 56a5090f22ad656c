//! Shared newtype wrappers and enums.

pub mod email;
pub mod id;
pub mod payment;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use payment::{PaymentMethod, PaymentMethodError};
pub use role::AdminRole;
