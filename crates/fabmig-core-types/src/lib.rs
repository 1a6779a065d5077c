//! Types shared by every fabmig crate
//!
//! - **Correlation**: `RunId` tags every event of one migration run
//! - **Sensitive data**: `Sensitive<T>` keeps secrets and tokens out of logs
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RunId;
pub use sensitive::Sensitive;
