pub mod authorization;
pub mod request_logging;
