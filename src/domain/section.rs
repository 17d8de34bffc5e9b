// ==========================================
// Maplewood 选课系统 - 教学班实体
// ==========================================
// 职责: 课程在某学期的具体开班 (教师/容量/上课时间)
// 说明: 同一课程同一学期可开多个教学班
// ==========================================

use crate::domain::types::DayOfWeek;
use serde::{Deserialize, Serialize};

// ==========================================
// MeetingTime - 每周固定上课时段 (值对象)
// ==========================================
// 说明: 时间为 "HH:MM" 字符串; 无日期范围, 按周循环
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    /// 星期几; None 视为无效时段 (不参与冲突判定)
    pub day_of_week: Option<DayOfWeek>,
    /// 开始时间, 如 "09:00"
    pub start_time: Option<String>,
    /// 结束时间, 如 "10:00"
    pub end_time: Option<String>,
}

impl MeetingTime {
    /// 创建新的上课时段
    pub fn new(day_of_week: DayOfWeek, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week: Some(day_of_week),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

// ==========================================
// CourseSection - 教学班
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSection {
    pub id: i64,
    /// 所属课程ID
    pub course_id: i64,
    /// 开班学期ID
    pub semester_id: i64,
    /// 任课教师ID
    pub teacher_id: Option<i64>,
    /// 教室ID
    pub classroom_id: Option<i64>,
    /// 容量上限
    pub capacity: Option<i64>,
    /// 当前已选人数
    pub enrolled_count: Option<i64>,
    /// 上课时段列表 (有序)
    pub meeting_times: Vec<MeetingTime>,
}
