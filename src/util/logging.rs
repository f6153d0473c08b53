// OkoView - util/logging.rs
//
// tracing setup. Everything goes to stderr so `--list` and `--day` keep
// stdout clean for piping.
//
// Level, first match wins: RUST_LOG, then --debug, then [logging] level from
// config.toml, then "info". Scans log one info line per completed catalog;
// skipped files are warn, duplicate dates and rejected rows debug/trace.

use super::constants;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive from the available sources.
fn directive(env: Option<String>, debug_flag: bool, config_level: Option<&str>) -> String {
    match (env.filter(|e| !e.trim().is_empty()), debug_flag, config_level) {
        (Some(env), _, _) => env,
        (None, true, _) => "debug".to_string(),
        (None, false, Some(level)) => level.to_string(),
        (None, false, None) => constants::DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Install the global subscriber. Call once, after config.toml is read.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let chosen = directive(std::env::var("RUST_LOG").ok(), debug_flag, config_level);
    let filter = EnvFilter::try_new(&chosen).unwrap_or_else(|_| {
        eprintln!("Ignoring invalid log filter '{chosen}'");
        EnvFilter::new(constants::DEFAULT_LOG_LEVEL)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug_flag)
        .compact()
        .init();

    tracing::debug!(filter = %chosen, "Logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(
            directive(Some("okoview=trace".into()), true, Some("warn")),
            "okoview=trace"
        );
    }

    #[test]
    fn test_debug_flag_beats_config() {
        assert_eq!(directive(None, true, Some("warn")), "debug");
        assert_eq!(directive(Some("  ".into()), true, None), "debug");
    }

    #[test]
    fn test_config_then_default() {
        assert_eq!(directive(None, false, Some("warn")), "warn");
        assert_eq!(directive(None, false, None), constants::DEFAULT_LOG_LEVEL);
    }
}
