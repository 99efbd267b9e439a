//! Test-harness logging setup. The crate itself only ever calls
//! `log::warn!`/`log::debug!`; it never installs a logger. This helper
//! exists for integration tests and downstream binaries that want the
//! same terminal logger shape used throughout the codebase this crate was
//! adapted from.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn init_logger(level: LevelFilter) {
  let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn init_logger_does_not_panic_on_repeated_calls() {
    init_logger(LevelFilter::Warn);
    init_logger(LevelFilter::Warn);
  }
}
