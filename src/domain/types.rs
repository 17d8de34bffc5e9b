// ==========================================
// Maplewood 选课系统 - 领域类型定义
// ==========================================
// 职责: 定义跨实体共享的基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 课程通过状态常量
// ==========================================
// 红线: "passed" 是唯一可满足先修课/已修完判定的状态值 (比较不区分大小写)
pub const PASSED_STATUS: &str = "passed";

/// 判断课程历史状态是否为"已通过"
///
/// # 参数
/// - status: 历史记录状态值
pub fn is_passed_status(status: &str) -> bool {
    status.eq_ignore_ascii_case(PASSED_STATUS)
}

// ==========================================
// 星期几 (Day of Week)
// ==========================================
// 说明: 仅覆盖教学日 (周一至周五), 周末不排课
// 序列化格式: 首字母大写英文单词 (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl DayOfWeek {
    /// 从字符串解析星期几 (不区分大小写)
    ///
    /// # 参数
    /// - value: 字符串形式 (如 "Monday")
    ///
    /// # 返回
    /// - Some(DayOfWeek): 解析成功
    /// - None: 无法识别的值
    pub fn from_value(value: &str) -> Option<DayOfWeek> {
        match value.to_ascii_lowercase().as_str() {
            "monday" => Some(DayOfWeek::Monday),
            "tuesday" => Some(DayOfWeek::Tuesday),
            "wednesday" => Some(DayOfWeek::Wednesday),
            "thursday" => Some(DayOfWeek::Thursday),
            "friday" => Some(DayOfWeek::Friday),
            _ => None,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayOfWeek::Monday => write!(f, "Monday"),
            DayOfWeek::Tuesday => write!(f, "Tuesday"),
            DayOfWeek::Wednesday => write!(f, "Wednesday"),
            DayOfWeek::Thursday => write!(f, "Thursday"),
            DayOfWeek::Friday => write!(f, "Friday"),
        }
    }
}
