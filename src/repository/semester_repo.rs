// ==========================================
// Maplewood 选课系统 - 学期数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: "仅有一个激活学期" 由数据维护流程保证; 本仓储按 id 取最小的激活行
// ==========================================

use crate::domain::Semester;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SemesterRepository - 学期仓储
// ==========================================
pub struct SemesterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SemesterRepository {
    /// 创建新的 SemesterRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询当前激活学期
    ///
    /// # 返回
    /// - `Ok(Some(Semester))`: 找到激活学期
    /// - `Ok(None)`: 无激活学期 (合法状态, 由调用方决定如何处理)
    pub fn find_active(&self) -> RepositoryResult<Option<Semester>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, name, year, order_in_year, start_date, end_date, is_active, created_at
               FROM semesters
               WHERE is_active = 1
               ORDER BY id
               LIMIT 1"#,
            [],
            Self::map_row,
        ) {
            Ok(semester) => Ok(Some(semester)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按ID查询学期
    pub fn find_by_id(&self, semester_id: i64) -> RepositoryResult<Option<Semester>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, name, year, order_in_year, start_date, end_date, is_active, created_at
               FROM semesters
               WHERE id = ?"#,
            params![semester_id],
            Self::map_row,
        ) {
            Ok(semester) => Ok(Some(semester)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入学期 (测试与数据准备用)
    pub fn insert(&self, semester: &Semester) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO semesters (
                name, year, order_in_year, start_date, end_date, is_active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &semester.name,
                &semester.year,
                &semester.order_in_year,
                &semester.start_date,
                &semester.end_date,
                semester.is_active,
                &semester.created_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Semester> {
        Ok(Semester {
            id: row.get(0)?,
            name: row.get(1)?,
            year: row.get(2)?,
            order_in_year: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
            is_active: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}
