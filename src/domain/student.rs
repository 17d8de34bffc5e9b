// ==========================================
// Maplewood 选课系统 - 学生实体
// ==========================================
// 职责: 学生主数据与学业指标
// 红线: 规则判定期间视为不可变快照
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Student - 学生主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    /// 年级 (9-12); 缺失时年级规则按不合格处理
    pub grade_level: Option<i64>,
    /// 入学年份
    pub enrollment_year: Option<i64>,
    /// 预计毕业年份
    pub expected_graduation_year: Option<i64>,
    /// 学籍状态 (如 "active")
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// StudentAcademicMetrics - 学业指标
// ==========================================
// 说明: 派生数据, 不落库; 由课程历史 + 课程学分聚合而来
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentAcademicMetrics {
    /// 已获学分 (仅统计 "passed" 记录, 截断取整)
    pub credits_earned: i64,
    /// 绩点 (二元通过制: 4.0 * 通过学分占比, 保留两位小数)
    pub gpa: f64,
}

impl StudentAcademicMetrics {
    /// 空指标 (无任何可统计历史时的取值)
    pub fn zero() -> Self {
        Self {
            credits_earned: 0,
            gpa: 0.0,
        }
    }
}
