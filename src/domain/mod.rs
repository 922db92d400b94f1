// Domain layer: API records, the order being built, and the port to the ordering service.

pub mod model;
pub mod order;
pub mod payment;
pub mod ports;
