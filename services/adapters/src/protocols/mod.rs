//! Adapter implementations, one module per protocol

pub mod stargate;
