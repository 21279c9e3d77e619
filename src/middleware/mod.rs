pub mod cors;
pub mod exception;
pub mod trace;
