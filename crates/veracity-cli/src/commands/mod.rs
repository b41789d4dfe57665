//! Command implementations.

pub mod config;
pub mod evaluate;
pub mod facts;
pub mod verify;

pub use self::config::execute_config;
pub use self::evaluate::execute_evaluate;
pub use self::facts::execute_facts;
pub use self::verify::execute_verify;
