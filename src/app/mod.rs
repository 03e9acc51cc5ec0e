// Application layer: ports the pipeline depends on

pub mod ports;
