// ==========================================
// Maplewood 选课系统 - 教师数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 仅用于选课结果富化 (展示任课教师), 规则判定不依赖本仓储
// ==========================================

use crate::domain::Teacher;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// TeacherRepository - 教师仓储
// ==========================================
pub struct TeacherRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TeacherRepository {
    /// 创建新的 TeacherRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量查询教师并按ID建立索引
    pub fn find_by_ids(&self, teacher_ids: &[i64]) -> RepositoryResult<HashMap<i64, Teacher>> {
        let mut result = HashMap::new();
        if teacher_ids.is_empty() {
            return Ok(result);
        }

        let conn = self.get_conn()?;

        let placeholders = vec!["?"; teacher_ids.len()].join(", ");
        let sql = format!(
            "SELECT id, first_name, last_name, email FROM teachers WHERE id IN ({placeholders})"
        );

        let mut stmt = conn.prepare(&sql)?;
        let teachers = stmt
            .query_map(rusqlite::params_from_iter(teacher_ids.iter()), Self::map_row)?
            .collect::<Result<Vec<Teacher>, _>>()?;

        for teacher in teachers {
            result.insert(teacher.id, teacher);
        }

        Ok(result)
    }

    /// 插入教师 (测试与数据准备用)
    pub fn insert(&self, teacher: &Teacher) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO teachers (first_name, last_name, email) VALUES (?, ?, ?)",
            params![&teacher.first_name, &teacher.last_name, &teacher.email],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
        Ok(Teacher {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
        })
    }
}
