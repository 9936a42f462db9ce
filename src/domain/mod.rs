// Domain layer: launch models and the launcher port. No process or IO code here.

pub mod model;
pub mod ports;
