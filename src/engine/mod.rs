// ==========================================
// Maplewood 选课系统 - 引擎层
// ==========================================
// 职责: 选课资格判定 + 学业指标聚合 + 选课/退课编排
// 分层: eligibility_core (纯函数) -> eligibility (配置接入)
//       -> orchestrator (数据装载与持久化)
// ==========================================

pub mod eligibility;
pub mod eligibility_core;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod rejection;
pub mod repositories;

pub use eligibility::{EligibilityContext, EligibilityEngine};
pub use eligibility_core::EligibilityCore;
pub use error::EnrollmentError;
pub use metrics::AcademicMetricsEngine;
pub use orchestrator::{EnrollmentDetail, EnrollmentOrchestrator};
pub use rejection::EligibilityRejection;
pub use repositories::EnrollmentRepositories;
