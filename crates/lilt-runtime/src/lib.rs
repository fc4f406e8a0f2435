//! Thread plumbing shared by the lilt worker crates.
//!
//! Three small pieces: [`ThreadHandle`] wraps spawning and joining one OS
//! thread, [`Priority`] carries a best-effort scheduling hint applied after
//! spawn, and [`wait`] provides the interruptible idle wait that cooperative
//! shutdown is built on.

#![deny(clippy::wildcard_imports)]

pub mod handle;
pub mod priority;
pub mod wait;

pub use handle::{JoinError, SpawnError, SpawnOptions, ThreadHandle};
pub use priority::Priority;
pub use wait::{ChannelWait, ChannelWaker, IdleWait, WaitOutcome, Waker, wake_channel};
