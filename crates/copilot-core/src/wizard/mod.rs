pub mod prompt;
pub mod session;
pub mod state;
pub mod support;
pub mod validation;
