pub mod delegated;
pub mod placeholder;
