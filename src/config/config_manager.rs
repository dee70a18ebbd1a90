// ==========================================
// 无人机作业协调系统 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表读取覆写项,缺省回落到 EngineConfig::default()
// 存储: config_kv 表 (scope_id='global', key, value)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::assignment::MissionIdCodec;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const PILOT_PERFECT_THRESHOLD: &str = "pilot_perfect_threshold";
    pub const PILOT_PARTIAL_THRESHOLD: &str = "pilot_partial_threshold";
    pub const DRONE_PERFECT_THRESHOLD: &str = "drone_perfect_threshold";
    pub const DRONE_PARTIAL_THRESHOLD: &str = "drone_partial_threshold";
    pub const REASSIGNMENT_TOP_N: &str = "reassignment_top_n";
    pub const RAIN_CAPABLE_MARKER: &str = "rain_capable_marker";
    pub const MAINTENANCE_WARNING_DAYS: &str = "maintenance_warning_days";
    pub const MISSION_ID_CANONICAL_PREFIX: &str = "mission_id_canonical_prefix";
    pub const MISSION_ID_LEGACY_PREFIX: &str = "mission_id_legacy_prefix";
    /// JSON: {"mapping": ["LiDAR", "RGB"], ...}
    pub const SKILL_CAPABILITY_MAP: &str = "skill_capability_map";
}

/// 维护预警窗口上限（天）
pub const MAX_MAINTENANCE_WARNING_DAYS: i64 = 3650;

/// 配置层错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Config store lock failed: {0}")]
    Lock(String),

    #[error("Invalid config value (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        tracing::info!(key = %key, value = %value, "config_kv 已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照
    pub fn get_config_snapshot(&self) -> Result<HashMap<String, String>, ConfigError> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut snapshot = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            snapshot.insert(key, value);
        }
        Ok(snapshot)
    }

    /// 加载引擎配置（覆写项 + 默认值）
    pub fn load_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = EngineConfig::default();

        if let Some(v) = self.get_parsed::<u32>(config_keys::PILOT_PERFECT_THRESHOLD)? {
            config.pilot_perfect_threshold = v;
        }
        if let Some(v) = self.get_parsed::<u32>(config_keys::PILOT_PARTIAL_THRESHOLD)? {
            config.pilot_partial_threshold = v;
        }
        if let Some(v) = self.get_parsed::<u32>(config_keys::DRONE_PERFECT_THRESHOLD)? {
            config.drone_perfect_threshold = v;
        }
        if let Some(v) = self.get_parsed::<u32>(config_keys::DRONE_PARTIAL_THRESHOLD)? {
            config.drone_partial_threshold = v;
        }
        if let Some(v) = self.get_parsed::<usize>(config_keys::REASSIGNMENT_TOP_N)? {
            config.reassignment_top_n = v;
        }
        if let Some(v) = self.get_parsed::<i64>(config_keys::MAINTENANCE_WARNING_DAYS)? {
            if !(0..=MAX_MAINTENANCE_WARNING_DAYS).contains(&v) {
                return Err(ConfigError::InvalidValue {
                    key: config_keys::MAINTENANCE_WARNING_DAYS.to_string(),
                    value: v.to_string(),
                    message: format!("must be between 0 and {}", MAX_MAINTENANCE_WARNING_DAYS),
                });
            }
            config.maintenance_warning_days = v;
        }
        if let Some(v) = self.get_global_config_value(config_keys::RAIN_CAPABLE_MARKER)? {
            config.rain_capable_marker = v;
        }

        let canonical = self.get_prefix(config_keys::MISSION_ID_CANONICAL_PREFIX)?;
        let legacy = self.get_prefix(config_keys::MISSION_ID_LEGACY_PREFIX)?;
        if canonical.is_some() || legacy.is_some() {
            let defaults = MissionIdCodec::default();
            config.mission_id_codec = MissionIdCodec::new(
                canonical.as_deref().unwrap_or(&defaults.canonical_prefix),
                legacy.as_deref().unwrap_or(&defaults.legacy_prefix),
            );
        }

        if let Some(raw) = self.get_global_config_value(config_keys::SKILL_CAPABILITY_MAP)? {
            let parsed: BTreeMap<String, Vec<String>> =
                serde_json::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                    key: config_keys::SKILL_CAPABILITY_MAP.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
            config.skill_capability_map = parsed
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect();
        }

        if config.pilot_partial_threshold > config.pilot_perfect_threshold
            || config.drone_partial_threshold > config.drone_perfect_threshold
        {
            return Err(ConfigError::InvalidValue {
                key: "thresholds".to_string(),
                value: format!(
                    "pilot {}/{}, drone {}/{}",
                    config.pilot_perfect_threshold,
                    config.pilot_partial_threshold,
                    config.drone_perfect_threshold,
                    config.drone_partial_threshold
                ),
                message: "partial threshold must not exceed perfect threshold".to_string(),
            });
        }

        tracing::debug!(?config, "引擎配置已加载");
        Ok(config)
    }

    /// 编号前缀不可为空白，否则双格式匹配失效
    fn get_prefix(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get_global_config_value(key)? {
            Some(raw) if raw.trim().is_empty() => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
                message: "prefix must not be empty".to_string(),
            }),
            other => Ok(other),
        }
    }

    fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_global_config_value(key)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                }),
        }
    }
}
