pub mod metrics;
pub mod obs;
pub mod signals;
pub mod telegram;
