// ==========================================
// Maplewood 选课系统 - 学期实体
// ==========================================
// 职责: 学年学期主数据
// 红线: "同一时刻仅有一个激活学期" 由数据层保证, 引擎不强制
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Semester - 学期
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    /// 学期名称 (如 "Fall 2025")
    pub name: String,
    pub year: Option<i64>,
    /// 学年内次序: 1=秋季, 2=春季
    pub order_in_year: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// 是否为当前激活学期
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// ==========================================
// SemesterSummary - 学期摘要 (用于结果富化)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub id: i64,
    pub name: String,
    pub year: Option<i64>,
    pub order_in_year: Option<i64>,
}

impl From<&Semester> for SemesterSummary {
    fn from(semester: &Semester) -> Self {
        Self {
            id: semester.id,
            name: semester.name.clone(),
            year: semester.year,
            order_in_year: semester.order_in_year,
        }
    }
}
