//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override server listen address, e.g. 0.0.0.0:4000
    #[arg(long)]
    pub listen: Option<String>,
    /// Override store location (memory:, file:<dir>, http(s)://..., sqlite:..., postgres://...)
    #[arg(long, env = "COUTURE_STORE")]
    pub store: Option<String>,
    /// Seed the demonstration set when the store is empty
    #[arg(long)]
    pub seed: Option<bool>,
    /// Override request timeout for remote stores (seconds)
    #[arg(long)]
    pub http_timeout_secs: Option<u64>,
    /// Override maximum request body size (bytes)
    #[arg(long)]
    pub request_body_limit_bytes: Option<usize>,
    /// Enable or disable permissive CORS
    #[arg(long)]
    pub cors: Option<bool>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (json/pretty/compact)
    #[arg(long)]
    pub log_format: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.store {
        config.store.location = v.clone();
    }
    if let Some(v) = overrides.seed {
        config.store.seed_on_start = v;
    }
    if let Some(v) = overrides.http_timeout_secs {
        config.store.http_timeout_secs = v;
    }
    if let Some(v) = overrides.request_body_limit_bytes {
        config.server.request_body_limit_bytes = v;
    }
    if let Some(v) = overrides.cors {
        config.server.cors = v;
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut cfg = Config::default();
        let overrides = CliOverrides::try_parse_from([
            "couture",
            "--listen",
            "0.0.0.0:9000",
            "--store",
            "memory:",
            "--seed",
            "true",
            "--log-level",
            "debug",
        ])
        .unwrap();
        apply_overrides(&mut cfg, &overrides);

        assert_eq!(cfg.server.listen, "0.0.0.0:9000");
        assert_eq!(cfg.store.location, "memory:");
        assert!(cfg.store.seed_on_start);
        assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
        assert!(cfg.server.cors);
        assert_eq!(cfg.store.http_timeout_secs, 30);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &CliOverrides::default());
        assert_eq!(cfg.server.listen, Config::default().server.listen);
        assert_eq!(cfg.store.location, Config::default().store.location);
    }
}
