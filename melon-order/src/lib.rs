pub mod models;
pub mod orders;

pub use models::{OrderLine, OrderType, MAX_MELONS};
pub use orders::{DomesticOrder, GovernmentOrder, InternationalOrder, MelonOrder, OrderTrait};
