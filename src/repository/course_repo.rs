// ==========================================
// Maplewood 选课系统 - 课程数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::Course;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// CourseRepository - 课程仓储
// ==========================================
pub struct CourseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseRepository {
    /// 创建新的 CourseRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按ID查询课程
    pub fn find_by_id(&self, course_id: i64) -> RepositoryResult<Option<Course>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, code, name, description, credits, hours_per_week,
                      prerequisite_id, grade_level_min, grade_level_max, created_at
               FROM courses
               WHERE id = ?"#,
            params![course_id],
            Self::map_row,
        ) {
            Ok(course) => Ok(Some(course)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 批量查询课程并按ID建立索引
    ///
    /// # 返回
    /// - `Ok(HashMap<id, Course>)`: 仅包含存在的课程
    pub fn find_by_ids(&self, course_ids: &[i64]) -> RepositoryResult<HashMap<i64, Course>> {
        let mut result = HashMap::new();
        if course_ids.is_empty() {
            return Ok(result);
        }

        let conn = self.get_conn()?;

        // 动态占位符, 全部参数化
        let placeholders = vec!["?"; course_ids.len()].join(", ");
        let sql = format!(
            r#"SELECT id, code, name, description, credits, hours_per_week,
                      prerequisite_id, grade_level_min, grade_level_max, created_at
               FROM courses
               WHERE id IN ({placeholders})"#
        );

        let mut stmt = conn.prepare(&sql)?;
        let courses = stmt
            .query_map(rusqlite::params_from_iter(course_ids.iter()), Self::map_row)?
            .collect::<Result<Vec<Course>, _>>()?;

        for course in courses {
            result.insert(course.id, course);
        }

        Ok(result)
    }

    /// 插入课程 (测试与数据准备用)
    pub fn insert(&self, course: &Course) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO courses (
                code, name, description, credits, hours_per_week,
                prerequisite_id, grade_level_min, grade_level_max, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &course.code,
                &course.name,
                &course.description,
                &course.credits,
                &course.hours_per_week,
                &course.prerequisite_id,
                &course.grade_level_min,
                &course.grade_level_max,
                &course.created_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Course> {
        Ok(Course {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            credits: row.get(4)?,
            hours_per_week: row.get(5)?,
            prerequisite_id: row.get(6)?,
            grade_level_min: row.get(7)?,
            grade_level_max: row.get(8)?,
            created_at: row.get(9)?,
        })
    }
}
