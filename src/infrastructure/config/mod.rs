//! Infrastructure configuration modules.

pub mod logging;
pub mod profile;
pub mod settings;
