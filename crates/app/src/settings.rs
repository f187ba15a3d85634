use std::error::Error;
use std::path::Path;

use config::{Config, Environment, File};
use tandem_core::config::AppConfig;

/// 未指定 `TANDEM_CONFIG` 时尝试读取的配置文件 (扩展名由 `config` 推断)
const DEFAULT_CONFIG_FILE: &str = "config/tandem";
const CONFIG_PATH_VAR: &str = "TANDEM_CONFIG";
const ENV_PREFIX: &str = "TANDEM";

/// # Summary
/// 加载分层配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加 `TANDEM_CONFIG` 指向的文件 (必须存在)，否则叠加可选的 `config/tandem.toml`。
/// 3. 叠加 `TANDEM__` 前缀的环境变量，如 `TANDEM__SERVER__PORT=9000`。
/// 4. 校验合并结果。
pub fn load() -> Result<AppConfig, Box<dyn Error>> {
    match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => build(Some(Path::new(&path)), true),
        Err(_) => build(Some(Path::new(DEFAULT_CONFIG_FILE)), false),
    }
}

fn build(file: Option<&Path>, required: bool) -> Result<AppConfig, Box<dyn Error>> {
    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(required));
    }
    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tandem_core::config::AlignmentPolicy;

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = build(None, false).unwrap();
        assert_eq!(config.analytics.window, 50);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.analytics.news_default_limit, 6);
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let config = build(Some(Path::new("does/not/exist.toml")), false).unwrap();
        assert_eq!(config.database.path, "data/tandem.db");
        assert!(build(Some(Path::new("does/not/exist.toml")), true).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_toml(
            r#"
[server]
port = 9100

[analytics]
window = 20
alignment = "strict"

[analytics.primary]
start = "2016-10-01"
end = "2017-06-30"
"#,
        );
        let config = build(Some(file.path()), true).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.analytics.window, 20);
        assert_eq!(config.analytics.alignment, AlignmentPolicy::Strict);
        assert_eq!(config.analytics.primary.start.to_string(), "2016-10-01");
        // 未覆盖的区间保持默认
        assert_eq!(config.analytics.correlation.start.to_string(), "2016-07-07");
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let file = write_toml("[analytics]\nwindow = 1\n");
        assert!(build(Some(file.path()), true).is_err());
    }
}
