pub mod figment;
pub mod telemetry;

mod sensitive;
pub use sensitive::Sensitive;
