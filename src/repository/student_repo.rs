// ==========================================
// Maplewood 选课系统 - 学生数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::Student;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// StudentRepository - 学生仓储
// ==========================================
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
    /// 创建新的 StudentRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按ID查询学生
    ///
    /// # 返回
    /// - `Ok(Some(Student))`: 找到学生
    /// - `Ok(None)`: 未找到
    /// - `Err`: 数据库错误
    pub fn find_by_id(&self, student_id: i64) -> RepositoryResult<Option<Student>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, first_name, last_name, email, grade_level,
                      enrollment_year, expected_graduation_year, status, created_at
               FROM students
               WHERE id = ?"#,
            params![student_id],
            Self::map_row,
        ) {
            Ok(student) => Ok(Some(student)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入学生 (测试与数据准备用)
    ///
    /// # 返回
    /// - `Ok(id)`: 新学生ID
    pub fn insert(&self, student: &Student) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO students (
                first_name, last_name, email, grade_level,
                enrollment_year, expected_graduation_year, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &student.first_name,
                &student.last_name,
                &student.email,
                &student.grade_level,
                &student.enrollment_year,
                &student.expected_graduation_year,
                &student.status,
                &student.created_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Student> {
        Ok(Student {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            grade_level: row.get(4)?,
            enrollment_year: row.get(5)?,
            expected_graduation_year: row.get(6)?,
            status: row.get(7)?,
            created_at: row.get::<_, DateTime<Utc>>(8)?,
        })
    }
}
