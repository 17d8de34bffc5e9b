// ==========================================
// Maplewood 选课系统 - 教学班数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: meeting_times 存于 section_meeting_times 子表, 查询时一并装配
// ==========================================

use crate::domain::types::DayOfWeek;
use crate::domain::{CourseSection, MeetingTime};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CourseSectionRepository - 教学班仓储
// ==========================================
pub struct CourseSectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseSectionRepository {
    /// 创建新的 CourseSectionRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询某课程在某学期开设的全部教学班
    pub fn find_by_course_id_and_semester_id(
        &self,
        course_id: i64,
        semester_id: i64,
    ) -> RepositoryResult<Vec<CourseSection>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT id, course_id, semester_id, teacher_id, classroom_id,
                      capacity, enrolled_count
               FROM course_sections
               WHERE course_id = ? AND semester_id = ?
               ORDER BY id"#,
        )?;

        let mut sections = stmt
            .query_map(params![course_id, semester_id], Self::map_row)?
            .collect::<Result<Vec<CourseSection>, _>>()?;

        for section in &mut sections {
            section.meeting_times = Self::load_meeting_times(&conn, section.id)?;
        }

        Ok(sections)
    }

    /// 查询多门课程在某学期开设的全部教学班
    pub fn find_by_course_ids_and_semester_id(
        &self,
        course_ids: &[i64],
        semester_id: i64,
    ) -> RepositoryResult<Vec<CourseSection>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;

        let placeholders = vec!["?"; course_ids.len()].join(", ");
        let sql = format!(
            r#"SELECT id, course_id, semester_id, teacher_id, classroom_id,
                      capacity, enrolled_count
               FROM course_sections
               WHERE course_id IN ({placeholders}) AND semester_id = ?
               ORDER BY id"#
        );

        let mut stmt = conn.prepare(&sql)?;
        let mut bind: Vec<i64> = course_ids.to_vec();
        bind.push(semester_id);

        let mut sections = stmt
            .query_map(rusqlite::params_from_iter(bind.iter()), Self::map_row)?
            .collect::<Result<Vec<CourseSection>, _>>()?;

        for section in &mut sections {
            section.meeting_times = Self::load_meeting_times(&conn, section.id)?;
        }

        Ok(sections)
    }

    /// 插入教学班及其上课时段 (测试与数据准备用)
    pub fn insert(&self, section: &CourseSection) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO course_sections (
                course_id, semester_id, teacher_id, classroom_id, capacity, enrolled_count
            ) VALUES (?, ?, ?, ?, ?, ?)"#,
            params![
                &section.course_id,
                &section.semester_id,
                &section.teacher_id,
                &section.classroom_id,
                &section.capacity,
                &section.enrolled_count.unwrap_or(0),
            ],
        )?;

        let section_id = conn.last_insert_rowid();

        for (order, meeting) in section.meeting_times.iter().enumerate() {
            conn.execute(
                r#"INSERT INTO section_meeting_times (
                    section_id, day_of_week, start_time, end_time, sort_order
                ) VALUES (?, ?, ?, ?, ?)"#,
                params![
                    section_id,
                    meeting.day_of_week.map(|d| d.to_string()),
                    &meeting.start_time,
                    &meeting.end_time,
                    order as i64,
                ],
            )?;
        }

        Ok(section_id)
    }

    /// 装配教学班的上课时段 (按 sort_order 排序)
    fn load_meeting_times(
        conn: &Connection,
        section_id: i64,
    ) -> RepositoryResult<Vec<MeetingTime>> {
        let mut stmt = conn.prepare(
            r#"SELECT day_of_week, start_time, end_time
               FROM section_meeting_times
               WHERE section_id = ?
               ORDER BY sort_order, id"#,
        )?;

        let meetings = stmt
            .query_map(params![section_id], |row| {
                let day: Option<String> = row.get(0)?;
                Ok(MeetingTime {
                    day_of_week: day.as_deref().and_then(DayOfWeek::from_value),
                    start_time: row.get(1)?,
                    end_time: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<MeetingTime>, _>>()?;

        Ok(meetings)
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<CourseSection> {
        Ok(CourseSection {
            id: row.get(0)?,
            course_id: row.get(1)?,
            semester_id: row.get(2)?,
            teacher_id: row.get(3)?,
            classroom_id: row.get(4)?,
            capacity: row.get(5)?,
            enrolled_count: row.get(6)?,
            meeting_times: Vec::new(),
        })
    }
}
