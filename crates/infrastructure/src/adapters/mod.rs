//! Adapters implementing application ports.

mod reqwest_executor;
mod system_clock;

pub use reqwest_executor::ReqwestExecutor;
pub use system_clock::SystemClock;
