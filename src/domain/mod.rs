// Domain layer: challenge model and the provider port.

pub mod model;
pub mod ports;
