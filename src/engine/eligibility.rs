// ==========================================
// Maplewood 选课系统 - 选课资格引擎
// ==========================================
// 职责: 读取配置阈值 + 按固定顺序执行资格规则
// 输入: 调用方提供的一致性数据快照 (EligibilityContext)
// 红线: 不直接读写库, 只计算并返回判定结果
// ==========================================

use crate::config::EnrollmentConfigReader;
use crate::domain::{Course, CourseHistory, CourseSection, Enrollment, Semester, Student};
use crate::engine::error::EnrollmentError;
use crate::engine::EligibilityCore;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// EligibilityContext - 资格判定数据快照
// ==========================================
// 红线: 快照必须在判定开始前一次性采集 (规则 2/3/6/7 对其联合推理),
//       判定期间不得再访问数据源
#[derive(Debug)]
pub struct EligibilityContext<'a> {
    pub student: &'a Student,
    pub course: &'a Course,
    pub target_section: &'a CourseSection,
    pub active_semester: &'a Semester,
    /// 学生在激活学期的全部在册选课
    pub current_semester_enrollments: &'a [Enrollment],
    /// 学生的全部课程历史 (跨学期)
    pub course_history: &'a [CourseHistory],
    /// current_semester_enrollments 对应的教学班
    pub current_enrollment_sections: &'a [CourseSection],
    /// 已获学分; None 表示不启用毕业学分规则
    pub earned_credits: Option<f64>,
}

// ==========================================
// EligibilityEngine - 选课资格引擎
// ==========================================
pub struct EligibilityEngine<C>
where
    C: EnrollmentConfigReader,
{
    config: Arc<C>,
}

impl<C> EligibilityEngine<C>
where
    C: EnrollmentConfigReader,
{
    /// 创建新的 EligibilityEngine 实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    /// 判定学生是否可选入目标教学班
    ///
    /// # 返回
    /// - `Ok(())`: 全部规则通过
    /// - `Err(Rejected)`: 首条未通过规则对应的拒绝
    /// - `Err(ConfigError)`: 配置读取失败
    #[instrument(skip(self, ctx), fields(
        student_id = ctx.student.id,
        course_id = ctx.course.id,
        section_id = ctx.target_section.id
    ))]
    pub async fn can_enroll(&self, ctx: &EligibilityContext<'_>) -> Result<(), EnrollmentError> {
        let max_courses = self
            .config
            .get_max_courses_per_semester()
            .await
            .map_err(|e| EnrollmentError::ConfigError(e.to_string()))?;
        let required_credits = self
            .config
            .get_required_graduation_credits()
            .await
            .map_err(|e| EnrollmentError::ConfigError(e.to_string()))?;

        let decision = EligibilityCore::check_enrollment(
            ctx.student,
            ctx.course,
            ctx.target_section,
            ctx.active_semester,
            ctx.current_semester_enrollments,
            ctx.course_history,
            ctx.current_enrollment_sections,
            max_courses,
            required_credits,
            ctx.earned_credits,
        );

        match decision {
            Ok(()) => {
                debug!("资格判定通过");
                Ok(())
            }
            Err(rejection) => {
                // 拒绝是预期业务结果, 按决策记录
                debug!(reason = rejection.reason_code(), "资格判定拒绝");
                Err(EnrollmentError::Rejected(rejection))
            }
        }
    }

    /// 判定选课记录是否允许退课
    pub fn can_unenroll(&self, enrollment: &Enrollment, active_semester: &Semester) -> bool {
        EligibilityCore::can_unenroll(enrollment, active_semester)
    }
}
