// ==========================================
// Maplewood 选课系统 - 选课记录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: UNIQUE(student_id, course_id, semester_id) 由数据库约束兜底
// ==========================================

use crate::domain::{Enrollment, NewEnrollment};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// EnrollmentRepository - 选课记录仓储
// ==========================================
pub struct EnrollmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EnrollmentRepository {
    /// 创建新的 EnrollmentRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询学生在某学期的全部在册选课
    pub fn find_by_student_id_and_semester_id(
        &self,
        student_id: i64,
        semester_id: i64,
    ) -> RepositoryResult<Vec<Enrollment>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT id, student_id, course_id, section_id, semester_id, created_at
               FROM enrollments
               WHERE student_id = ? AND semester_id = ?
               ORDER BY id"#,
        )?;

        let enrollments = stmt
            .query_map(params![student_id, semester_id], Self::map_row)?
            .collect::<Result<Vec<Enrollment>, _>>()?;

        Ok(enrollments)
    }

    /// 查询学生在某学期对某课程的在册选课 (至多一条)
    pub fn find_by_student_id_and_course_id_and_semester_id(
        &self,
        student_id: i64,
        course_id: i64,
        semester_id: i64,
    ) -> RepositoryResult<Option<Enrollment>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, student_id, course_id, section_id, semester_id, created_at
               FROM enrollments
               WHERE student_id = ? AND course_id = ? AND semester_id = ?"#,
            params![student_id, course_id, semester_id],
            Self::map_row,
        ) {
            Ok(enrollment) => Ok(Some(enrollment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入选课记录
    ///
    /// # 返回
    /// - `Ok(Enrollment)`: 含数据库生成ID的完整记录
    /// - `Err(UniqueConstraintViolation)`: 违反同学期同课程唯一约束
    pub fn save(&self, new_enrollment: &NewEnrollment) -> RepositoryResult<Enrollment> {
        let conn = self.get_conn()?;
        let created_at = Utc::now();

        conn.execute(
            r#"INSERT INTO enrollments (
                student_id, course_id, section_id, semester_id, created_at
            ) VALUES (?, ?, ?, ?, ?)"#,
            params![
                new_enrollment.student_id,
                new_enrollment.course_id,
                new_enrollment.section_id,
                new_enrollment.semester_id,
                created_at,
            ],
        )?;

        Ok(Enrollment {
            id: conn.last_insert_rowid(),
            student_id: new_enrollment.student_id,
            course_id: new_enrollment.course_id,
            section_id: new_enrollment.section_id,
            semester_id: new_enrollment.semester_id,
            created_at: Some(created_at),
        })
    }

    /// 按ID删除选课记录
    ///
    /// # 返回
    /// - `Ok(true)`: 删除了一行
    /// - `Ok(false)`: 记录不存在
    pub fn delete_by_id(&self, enrollment_id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM enrollments WHERE id = ?",
            params![enrollment_id],
        )?;

        Ok(affected > 0)
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
        Ok(Enrollment {
            id: row.get(0)?,
            student_id: row.get(1)?,
            course_id: row.get(2)?,
            section_id: row.get(3)?,
            semester_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}
