//! Startup banner and session summary display.

use crate::config::Config;
use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// What happened during a session, for the farewell line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub loads: u64,
    pub answers: u64,
    pub failures: u64,
}

/// Print the startup banner with session info.
pub fn print_banner(config: &Config) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             Y E S · N O               ║
   ║     ask, and the oracle will nod      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   oracle    {}
   timeout   {}s
   viewer    {}

   press enter to ask, /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        config.api_url,
        config.timeout.as_secs(),
        if config.open_content { "on" } else { "off" },
    );
}

/// One-line summary of the session, or `None` if nothing was asked.
pub fn summary_line(stats: SessionStats) -> Option<String> {
    if stats.loads == 0 {
        return None;
    }
    Some(format!(
        "session: {} asked, {} answered, {} failed",
        stats.loads, stats.answers, stats.failures
    ))
}

/// Print the session summary and farewell.
pub fn print_session_summary(stats: SessionStats) {
    if let Some(line) = summary_line(stats) {
        println!("{line}");
    }
    println!("goodbye.");
}
