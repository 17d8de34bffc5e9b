// ==========================================
// Maplewood 选课系统 - 教师实体
// ==========================================
// 职责: 教师主数据 (仅用于结果富化, 不参与规则判定)
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}
