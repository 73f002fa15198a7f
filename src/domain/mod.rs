// Domain layer: value types and the pocket/storage ports.

pub mod ports;
pub mod units;
