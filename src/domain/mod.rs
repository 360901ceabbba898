// Domain layer: catalog models and the ports the view-models depend on.

pub mod model;
pub mod ports;
