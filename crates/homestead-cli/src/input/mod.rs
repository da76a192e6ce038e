pub mod settings;
pub mod snapshot;
pub mod source;
