pub mod collector;
pub mod encoding;
pub mod layout;
pub mod metrics;
