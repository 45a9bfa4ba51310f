// Domain layer: launcher models and ports. Only std, serde and serde_yaml.

pub mod model;
pub mod ports;
