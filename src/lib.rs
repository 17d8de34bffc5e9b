// ==========================================
// Maplewood 选课系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 选课资格决策引擎 (规则判定 + 学业指标 + 选课编排)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::DayOfWeek;

// 领域实体
pub use domain::{
    Course, CourseHistory, CourseSection, Enrollment, MeetingTime, Semester, SemesterSummary,
    Student, StudentAcademicMetrics, Teacher,
};

// 引擎
pub use engine::{
    AcademicMetricsEngine, EligibilityContext, EligibilityCore, EligibilityEngine,
    EligibilityRejection, EnrollmentDetail, EnrollmentError, EnrollmentOrchestrator,
    EnrollmentRepositories,
};

// 配置
pub use config::{config_keys, ConfigManager, EnrollmentConfigReader};

// 仓储
pub use repository::{RepositoryError, RepositoryResult};
