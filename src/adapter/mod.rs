//! Adapters: the command line on the driving side, stores on the driven side.

pub mod inbound;
pub mod outbound;
