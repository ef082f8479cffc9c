//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 连接串，如 `sqlite://offers.db` 或 `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://offers.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        }
    }
}

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许的跨域来源，逗号分隔；`*` 表示不做限制
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: "*".to_string(),
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "offer-service".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（OFFER_ 前缀，层级用 `__` 分隔，如 OFFER_DATABASE__URL -> database.url）
    /// 5. PORT 环境变量覆盖监听端口
    pub fn load(service_name: &str) -> Result<Self> {
        let env = std::env::var("OFFER_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("OFFER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config = Self::from_builder(builder)?;

        if let Some(port) = parse_port(std::env::var("PORT").ok().as_deref()) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 合并所有配置源并反序列化
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 解析 PORT 取值，无法解析时忽略
fn parse_port(value: Option<&str>) -> Option<u16> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SharedError;

    fn toml_source(content: &str) -> File<config::FileSourceString, config::FileFormat> {
        File::from_str(content, config::FileFormat::Toml)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origins, "*");
        assert_eq!(config.database.url, "sqlite://offers.db");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(Some("8080")), Some(8080));
        assert_eq!(parse_port(Some(" 9000 ")), Some(9000));
        assert_eq!(parse_port(Some("not-a-port")), None);
        assert_eq!(parse_port(Some("70000")), None);
        assert_eq!(parse_port(None), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        // 只覆盖部分字段时，其余字段应回落到默认值
        let config = AppConfig::from_builder(Config::builder().add_source(toml_source(
            "[server]\nport = 9100\n\n[database]\nurl = \"sqlite::memory:\"\n",
        )))
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let result = AppConfig::from_builder(
            Config::builder().add_source(toml_source("[server]\nport = \"eighty\"\n")),
        );
        assert!(matches!(result, Err(SharedError::Config(_))));
    }

    #[test]
    fn test_json_logs_flag() {
        let mut obs = ObservabilityConfig::default();
        assert!(!obs.json_logs());
        obs.log_format = "JSON".to_string();
        assert!(obs.json_logs());
    }
}
