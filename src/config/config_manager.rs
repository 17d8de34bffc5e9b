// ==========================================
// Maplewood 选课系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::enrollment_config_trait::EnrollmentConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 单学期最大选课数
    pub const MAX_COURSES_PER_SEMESTER: &str = "enrollment/max_courses_per_semester";
    /// 毕业所需学分
    pub const REQUIRED_GRADUATION_CREDITS: &str = "enrollment/required_graduation_credits";
}

/// 单学期最大选课数默认值
pub const DEFAULT_MAX_COURSES_PER_SEMESTER: i64 = 5;

/// 毕业所需学分默认值
pub const DEFAULT_REQUIRED_GRADUATION_CREDITS: f64 = 30.0;

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
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值 (覆写)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
               ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value"#,
            params![key, value],
        )?;

        Ok(())
    }

    /// 读取整型配置, 缺失或非法时回退默认值
    fn get_i64_or_default(&self, key: &str, default: i64) -> Result<i64, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => Ok(raw.trim().parse::<i64>().unwrap_or(default)),
            None => Ok(default),
        }
    }

    /// 读取浮点配置, 缺失或非法时回退默认值
    fn get_f64_or_default(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => Ok(raw.trim().parse::<f64>().unwrap_or(default)),
            None => Ok(default),
        }
    }
}

#[async_trait]
impl EnrollmentConfigReader for ConfigManager {
    async fn get_max_courses_per_semester(&self) -> Result<i64, Box<dyn Error>> {
        self.get_i64_or_default(
            config_keys::MAX_COURSES_PER_SEMESTER,
            DEFAULT_MAX_COURSES_PER_SEMESTER,
        )
    }

    async fn get_required_graduation_credits(&self) -> Result<f64, Box<dyn Error>> {
        self.get_f64_or_default(
            config_keys::REQUIRED_GRADUATION_CREDITS,
            DEFAULT_REQUIRED_GRADUATION_CREDITS,
        )
    }
}
