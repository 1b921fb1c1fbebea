mod alert;
mod direction;
mod price_update;
mod stock;
mod transition;

pub use alert::{Alert, AlertKind};
pub use direction::AlertDirection;
pub use price_update::PriceUpdate;
pub use stock::{PriceApplication, StockRecord};
pub use transition::Transition;
