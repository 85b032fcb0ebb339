// Domain layer: package model and ports. No process or filesystem access here.

pub mod model;
pub mod ports;
