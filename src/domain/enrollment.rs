// ==========================================
// Maplewood 选课系统 - 选课记录实体
// ==========================================
// 职责: 学生在某学期对某课程的在册选课
// 红线: (student_id, course_id, semester_id) 唯一
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Enrollment - 选课记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// 所选教学班ID
    pub section_id: i64,
    /// 所属学期ID (恒等于教学班的学期ID)
    pub semester_id: i64,
    pub created_at: Option<DateTime<Utc>>,
}

// ==========================================
// NewEnrollment - 待持久化的选课记录
// ==========================================
// 说明: id 由数据库生成, 插入成功后返回完整 Enrollment
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub section_id: i64,
    pub semester_id: i64,
}
