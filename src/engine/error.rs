// ==========================================
// Maplewood 选课系统 - 选课流程错误类型
// ==========================================
// 职责: 区分三类互斥结果
// - NotFound 类: 实体缺失, 请求终止, 携带缺失标识
// - Rejected: 资格拒绝 (预期业务结果)
// - Repository/Config: 基础设施故障, 原样向上传播, 不得吞掉
// ==========================================

use crate::engine::rejection::EligibilityRejection;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 选课流程错误类型
#[derive(Error, Debug)]
pub enum EnrollmentError {
    // ===== 实体缺失 =====
    #[error("Student not found: id={0}")]
    StudentNotFound(i64),

    #[error("Course not found: id={0}")]
    CourseNotFound(i64),

    #[error("Course section not found: id={0}")]
    CourseSectionNotFound(i64),

    #[error("Enrollment not found: student_id={student_id}, course_id={course_id}, semester_id={semester_id}")]
    EnrollmentNotFound {
        student_id: i64,
        course_id: i64,
        semester_id: i64,
    },

    #[error("Active semester not found")]
    ActiveSemesterNotFound,

    // ===== 资格拒绝 =====
    #[error(transparent)]
    Rejected(#[from] EligibilityRejection),

    // ===== 基础设施故障 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("配置读取失败: {0}")]
    ConfigError(String),
}

impl EnrollmentError {
    /// 是否为实体缺失类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EnrollmentError::StudentNotFound(_)
                | EnrollmentError::CourseNotFound(_)
                | EnrollmentError::CourseSectionNotFound(_)
                | EnrollmentError::EnrollmentNotFound { .. }
                | EnrollmentError::ActiveSemesterNotFound
        )
    }

    /// 是否为资格拒绝
    pub fn as_rejection(&self) -> Option<&EligibilityRejection> {
        match self {
            EnrollmentError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
