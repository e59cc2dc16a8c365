pub mod consent;
pub mod macros;
pub mod wallet;
