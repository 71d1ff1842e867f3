// Domain layer: core models and ports (interfaces). No external I/O here.

pub mod model;
pub mod ports;
