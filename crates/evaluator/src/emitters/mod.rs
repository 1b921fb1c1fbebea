//! Alert emitter adapters

mod broadcast;
mod logger;

pub use broadcast::BroadcastEmitter;
pub use logger::LogEmitter;
