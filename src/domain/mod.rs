// Domain layer: request/response models and the ports the lookup depends on.

pub mod model;
pub mod ports;
