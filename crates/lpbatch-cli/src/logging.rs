use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only the report. A non-empty `RUST_LOG`
/// replaces the default level; otherwise `verbose` picks DEBUG over WARN.
pub fn init_tracing(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(directives, verbose))
        .init();
}

fn build_filter(directives: Option<String>, verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn default_level_follows_verbosity() {
        assert_eq!(build_filter(None, false).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn env_directives_replace_default() {
        let filter = build_filter(Some("debug".to_string()), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        let filter = build_filter(Some("error".to_string()), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn blank_env_falls_back() {
        let filter = build_filter(Some("  ".to_string()), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
