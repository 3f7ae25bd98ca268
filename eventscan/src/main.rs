//! Main binary entry point for the eventscan static analysis tool.
//!
//! This binary delegates to the shared `entry_point::run_with_args()` function
//! so every entry point behaves the same.

use anyhow::Result;

fn main() -> Result<()> {
    let code = eventscan::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
