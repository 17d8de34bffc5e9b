// ==========================================
// Maplewood 选课系统 - 资格拒绝类型
// ==========================================
// 职责: 资格规则的带标签拒绝结果 (reason code + 可读消息)
// 红线: reason code 与调用方 (HTTP 层) 的错误码一一对应, 不得改动
// 说明: 拒绝是预期的业务结果, 不是缺陷; 调用方按决策记录, 不按错误记录
// ==========================================

use thiserror::Error;

// ==========================================
// EligibilityRejection - 资格拒绝
// ==========================================
// 消息文案为对外 API 契约的一部分, 保持英文原文
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EligibilityRejection {
    /// 目标教学班不属于激活学期
    #[error("Enrollment can only be performed in the active semester.")]
    NotActiveSemester,

    /// 已达单学期选课上限
    #[error("You have reached the maximum limit of {limit} enrollments.")]
    MaxCoursesReached { limit: i64 },

    /// 该课程已修读通过
    #[error("You have already passed this course.")]
    AlreadyPassed,

    /// 已修满毕业所需学分
    #[error("You have already reached the required graduation credits.")]
    GraduationCreditsReached,

    /// 年级不符合课程年级区间要求
    #[error("Your grade level is not eligible for this course.")]
    GradeLevelNotEligible,

    /// 缺少先修课程的通过记录
    #[error("Missing prerequisite for enrollment.")]
    MissingPrerequisite { prerequisite_course_id: i64 },

    /// 与当前课表时间冲突
    #[error("This course conflicts with your current schedule.")]
    ScheduleConflict,

    /// 退课仅允许操作激活学期的在册选课
    #[error("Unroll is only allowed for enrollments in the active semester.")]
    UnenrollNotAllowed,
}

impl EligibilityRejection {
    /// 拒绝原因码 (对外错误码)
    pub fn reason_code(&self) -> &'static str {
        match self {
            EligibilityRejection::NotActiveSemester => "other",
            EligibilityRejection::MaxCoursesReached { .. } => "max_courses",
            EligibilityRejection::AlreadyPassed => "other",
            EligibilityRejection::GraduationCreditsReached => "other",
            EligibilityRejection::GradeLevelNotEligible => "grade_level",
            EligibilityRejection::MissingPrerequisite { .. } => "prerequisite",
            EligibilityRejection::ScheduleConflict => "conflict",
            EligibilityRejection::UnenrollNotAllowed => "other",
        }
    }

    /// 未满足的先修课程ID (仅 prerequisite 拒绝携带)
    pub fn prerequisite_course_id(&self) -> Option<i64> {
        match self {
            EligibilityRejection::MissingPrerequisite {
                prerequisite_course_id,
            } => Some(*prerequisite_course_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_code_mapping() {
        assert_eq!(EligibilityRejection::NotActiveSemester.reason_code(), "other");
        assert_eq!(
            EligibilityRejection::MaxCoursesReached { limit: 5 }.reason_code(),
            "max_courses"
        );
        assert_eq!(EligibilityRejection::AlreadyPassed.reason_code(), "other");
        assert_eq!(
            EligibilityRejection::GraduationCreditsReached.reason_code(),
            "other"
        );
        assert_eq!(
            EligibilityRejection::GradeLevelNotEligible.reason_code(),
            "grade_level"
        );
        assert_eq!(
            EligibilityRejection::MissingPrerequisite {
                prerequisite_course_id: 7
            }
            .reason_code(),
            "prerequisite"
        );
        assert_eq!(EligibilityRejection::ScheduleConflict.reason_code(), "conflict");
        assert_eq!(EligibilityRejection::UnenrollNotAllowed.reason_code(), "other");
    }

    #[test]
    fn test_max_courses_message_contains_limit() {
        let rejection = EligibilityRejection::MaxCoursesReached { limit: 5 };
        assert_eq!(
            rejection.to_string(),
            "You have reached the maximum limit of 5 enrollments."
        );
    }

    #[test]
    fn test_prerequisite_payload() {
        let rejection = EligibilityRejection::MissingPrerequisite {
            prerequisite_course_id: 42,
        };
        assert_eq!(rejection.prerequisite_course_id(), Some(42));
        assert_eq!(EligibilityRejection::ScheduleConflict.prerequisite_course_id(), None);
    }
}
