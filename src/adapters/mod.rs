//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                     |
//! |----------------|----------------|---------------------------------|
//! | `memory_store` | StateStore     | Process memory (atomics + lock) |
//! | `detector`     | CatDetector    | Fixed/random fake, VisionClient |
//! | `log_listener` | StatusListener | `log` facade                    |

pub mod detector;
pub mod log_listener;
pub mod memory_store;
