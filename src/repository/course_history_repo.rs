// ==========================================
// Maplewood 选课系统 - 课程历史数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 学业指标聚合 SQL 与引擎侧纯计算 (AcademicMetricsEngine) 口径一致,
//       二者的等价性由集成测试保证
// ==========================================

use crate::domain::{CourseHistory, StudentAcademicMetrics};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CourseHistoryRepository - 课程历史仓储
// ==========================================
pub struct CourseHistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseHistoryRepository {
    /// 创建新的 CourseHistoryRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询学生全部课程历史 (跨学期)
    pub fn find_by_student_id(&self, student_id: i64) -> RepositoryResult<Vec<CourseHistory>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT id, student_id, course_id, course_section_id, semester_id, status, created_at
               FROM student_course_history
               WHERE student_id = ?
               ORDER BY id"#,
        )?;

        let history = stmt
            .query_map(params![student_id], Self::map_row)?
            .collect::<Result<Vec<CourseHistory>, _>>()?;

        Ok(history)
    }

    /// 查询学生学业指标 (数据库侧聚合)
    ///
    /// 口径:
    /// - credits_earned = SUM(通过记录的课程学分), 截断取整
    /// - gpa = ROUND(通过学分 / 全部可解析学分 * 4.0, 2); 分母为 0 时二者均为 0
    ///
    /// # 返回
    /// - `Ok(StudentAcademicMetrics)`: 无历史时返回零值
    pub fn find_student_academic_metrics(
        &self,
        student_id: i64,
    ) -> RepositoryResult<StudentAcademicMetrics> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            r#"SELECT
                   COALESCE(CAST(SUM(CASE WHEN LOWER(sch.status) = 'passed' THEN c.credits ELSE 0 END) AS INTEGER), 0),
                   IFNULL(ROUND(
                       SUM(CASE WHEN LOWER(sch.status) = 'passed' THEN c.credits ELSE 0 END) / SUM(c.credits) * 4.0,
                       2
                   ), 0)
               FROM students s
               LEFT JOIN student_course_history sch ON s.id = sch.student_id
               LEFT JOIN courses c ON sch.course_id = c.id
               WHERE s.id = ?
               GROUP BY s.id"#,
            params![student_id],
            |row| {
                Ok(StudentAcademicMetrics {
                    credits_earned: row.get(0)?,
                    gpa: row.get(1)?,
                })
            },
        );

        match result {
            Ok(metrics) => Ok(metrics),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(StudentAcademicMetrics::zero()),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入历史记录 (测试与数据准备用; 业务侧由期末结转流程写入)
    pub fn insert(&self, history: &CourseHistory) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO student_course_history (
                student_id, course_id, course_section_id, semester_id, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)"#,
            params![
                history.student_id,
                history.course_id,
                history.course_section_id,
                history.semester_id,
                &history.status,
                &history.created_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<CourseHistory> {
        Ok(CourseHistory {
            id: row.get(0)?,
            student_id: row.get(1)?,
            course_id: row.get(2)?,
            course_section_id: row.get(3)?,
            semester_id: row.get(4)?,
            status: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
