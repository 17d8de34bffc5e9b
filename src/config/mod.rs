// ==========================================
// Maplewood 选课系统 - 配置层
// ==========================================
// 职责: 系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod enrollment_config_trait;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, ConfigManager, DEFAULT_MAX_COURSES_PER_SEMESTER,
    DEFAULT_REQUIRED_GRADUATION_CREDITS,
};
pub use enrollment_config_trait::EnrollmentConfigReader;
