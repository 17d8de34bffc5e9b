// ==========================================
// Maplewood 选课系统 - 课程实体
// ==========================================
// 职责: 课程目录主数据 (不绑定学期)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Course - 课程目录条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    /// 课程编码 (如 "MATH101")
    pub code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// 学分数
    pub credits: Option<f64>,
    /// 每周课时数
    pub hours_per_week: Option<i64>,
    /// 先修课程ID; None 表示无先修要求
    pub prerequisite_id: Option<i64>,
    /// 年级下限 (含); None 表示不限
    pub grade_level_min: Option<i64>,
    /// 年级上限 (含); None 表示不限
    pub grade_level_max: Option<i64>,
    pub created_at: Option<String>,
}
