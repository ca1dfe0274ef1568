pub mod fallback;
pub mod metrics;
pub mod status;
