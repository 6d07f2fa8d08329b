// ABOUTME: Command module aggregator for the sequester CLI.
// ABOUTME: Re-exports contain, describe, and tag command handlers.

mod contain;
mod describe;
mod tag;

pub use contain::{contain, output_mode};
pub use describe::describe;
pub use tag::{tag, untag};
