use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 公告 / 抽奖历史列表的条数限制
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_list_limit")]
    pub default_limit: u64,
    #[serde(default = "max_list_limit")]
    pub max_limit: u64,
}

fn default_list_limit() -> u64 {
    50
}

fn max_list_limit() -> u64 {
    200
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
            max_limit: max_list_limit(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let lookup = |name: &str| env::var(name).ok();

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_lookup(lookup)?,
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config =
            toml::from_str(config_str).map_err(|e| format!("解析配置文件失败: {e}"))?;
        Ok(config)
    }

    /// 无配置文件：使用环境变量与默认值构建
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_parse = |name: &str, default: u64| -> u64 {
            lookup(name)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(default)
        };

        // 数据库 URL 在无配置文件时必须提供
        let database_url = lookup("DATABASE_URL")
            .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("SERVER_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: lookup("DB_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            listing: ListingConfig {
                default_limit: get_parse("LIST_DEFAULT_LIMIT", default_list_limit()),
                max_limit: get_parse("LIST_MAX_LIMIT", max_list_limit()),
            },
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Some(v) = lookup("LIST_DEFAULT_LIMIT")
            && let Ok(n) = v.parse()
        {
            self.listing.default_limit = n;
        }
        if let Some(v) = lookup("LIST_MAX_LIMIT")
            && let Ok(n) = v.parse()
        {
            self.listing.max_limit = n;
        }
    }
}
