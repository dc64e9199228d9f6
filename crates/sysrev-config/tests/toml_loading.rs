//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use sysrev_config::SysrevConfig;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
api_key = "toml-key"
base_url = "http://localhost:4061"
timeout_secs = 5

[sync]
page_limit = 50
sort_by = "article-added"
sort_dir = "desc"

[store]
path = "mirror/review.duckdb"
"#,
        )?;

        let config: SysrevConfig = Figment::from(Serialized::defaults(SysrevConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.api_key, "toml-key");
        assert_eq!(config.api.base_url, "http://localhost:4061");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.sync.page_limit, 50);
        assert_eq!(config.sync.sort_by.as_deref(), Some("article-added"));
        assert_eq!(config.sync.sort_dir.as_deref(), Some("desc"));
        assert_eq!(config.store.path, "mirror/review.duckdb");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[api]\napi_key = \"only-key\"\n")?;

        let config: SysrevConfig = Figment::from(Serialized::defaults(SysrevConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.api_key, "only-key");
        assert_eq!(config.api.base_url, "https://www.sysrev.com");
        assert_eq!(config.sync.page_limit, 10);
        assert!(config.sync.sort_by.is_none());
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".sysrev")).map_err(|e| e.to_string())?;
        jail.create_file(".sysrev/config.toml", "[sync]\npage_limit = 3\n")?;

        let config = SysrevConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.sync.page_limit, 3);
        Ok(())
    });
}
