#![no_std]

pub mod engine;
pub mod error;
pub mod step;
pub mod types;

pub use engine::{compute_swap, resolve_sqrt_price_limit};
pub use error::SwapError;
pub use step::{compute_swap_step, SwapStep};
pub use types::{SwapOutcome, SwapParams, SwapResult, SwapState};
