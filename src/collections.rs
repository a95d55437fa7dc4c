//! Small containers used alongside the codec.

pub mod capped;
pub mod settings;

pub use capped::{CapacityError, CappedStack};
pub use settings::{Change, Settings, SubscriptionId};
