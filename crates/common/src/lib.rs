//! Shared identifiers and value types for the storefront.
//!
//! Row identifiers, money amounts in the store currency, and the order
//! status vocabulary are used by every other crate in the workspace.

mod ids;
mod money;
mod status;

pub use ids::{OrderId, ProductId, ReviewId};
pub use money::{CURRENCY_CODE, Money};
pub use status::{OrderStatus, UnknownStatus};
