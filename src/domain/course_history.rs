// ==========================================
// Maplewood 选课系统 - 课程历史实体
// ==========================================
// 职责: 学生历史学期的课程结课记录 (只追加)
// 说明: 结课记录由期末结转流程产生, 引擎侧只读
// ==========================================

use crate::domain::types::is_passed_status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CourseHistory - 课程历史记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseHistory {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// 当时所在教学班ID
    pub course_section_id: Option<i64>,
    pub semester_id: i64,
    /// 结课状态; 仅 "passed" 计入学分与先修判定
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl CourseHistory {
    /// 该条历史是否为"已通过"
    pub fn is_passed(&self) -> bool {
        is_passed_status(&self.status)
    }
}
