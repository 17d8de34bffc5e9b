// ==========================================
// Maplewood 选课系统 - 选课编排器
// ==========================================
// 职责: 协调一次选课/退课请求的完整流程
// 流程: 解析激活学期 -> 采集数据快照 -> 资格判定 -> 持久化 -> 结果富化
// 红线: 每个请求全程持有仓储集合的写入门闩, "检查在册 -> 判定 -> 写入"
//       构成单一工作单元, 并发请求串行执行;
//       资格拒绝与实体缺失均不产生任何持久化变更
// ==========================================

use crate::config::EnrollmentConfigReader;
use crate::domain::{
    Course, CourseSection, Enrollment, NewEnrollment, Semester, SemesterSummary,
    StudentAcademicMetrics, Teacher,
};
use crate::engine::eligibility::{EligibilityContext, EligibilityEngine};
use crate::engine::error::EnrollmentError;
use crate::engine::metrics::AcademicMetricsEngine;
use crate::engine::repositories::EnrollmentRepositories;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// EnrollmentDetail - 富化后的选课表示
// ==========================================
#[derive(Debug, Clone)]
pub struct EnrollmentDetail {
    pub enrollment: Enrollment,
    pub course: Course,
    pub section: CourseSection,
    /// 任课教师 (可能未指派)
    pub teacher: Option<Teacher>,
    pub semester: SemesterSummary,
}

// ==========================================
// EnrollmentOrchestrator - 选课编排器
// ==========================================
pub struct EnrollmentOrchestrator<C>
where
    C: EnrollmentConfigReader,
{
    repos: EnrollmentRepositories,
    eligibility: EligibilityEngine<C>,
    metrics: AcademicMetricsEngine,
}

impl<C> EnrollmentOrchestrator<C>
where
    C: EnrollmentConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - repos: 仓储集合
    /// - config: 配置读取器
    pub fn new(repos: EnrollmentRepositories, config: Arc<C>) -> Self {
        Self {
            repos,
            eligibility: EligibilityEngine::new(config),
            metrics: AcademicMetricsEngine::new(),
        }
    }

    /// 创建选课
    ///
    /// # 流程
    /// 1. 解析激活学期; 缺失 -> ActiveSemesterNotFound
    /// 2. 已存在同学期同课程在册选课 -> 幂等返回原记录 (即使请求的教学班不同)
    /// 3. 装载学生/课程/目标教学班/在册选课/课程历史的一致性快照
    /// 4. 按固定顺序执行资格规则; 任一失败即中止, 无持久化变更
    /// 5. 插入新选课并返回富化表示
    ///
    /// 全程持有写入门闩: 步骤 2-5 之间不会插入其他请求的写入,
    /// 计数类规则 (选课上限) 不会被并发请求绕过
    #[instrument(skip(self))]
    pub async fn create_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
        section_id: i64,
    ) -> Result<EnrollmentDetail, EnrollmentError> {
        info!(student_id, course_id, section_id, "开始处理选课请求");

        let _write_gate = self.repos.write_gate.lock().await;

        // === 步骤1: 解析激活学期 ===
        let active_semester = self
            .repos
            .semester_repo
            .find_active()?
            .ok_or(EnrollmentError::ActiveSemesterNotFound)?;

        // === 步骤2: 幂等检查 ===
        if let Some(existing) = self
            .repos
            .enrollment_repo
            .find_by_student_id_and_course_id_and_semester_id(
                student_id,
                course_id,
                active_semester.id,
            )?
        {
            info!(enrollment_id = existing.id, "选课已存在, 幂等返回原记录");
            return self.to_enrollment_detail(&existing, &active_semester);
        }

        // === 步骤3: 采集数据快照 ===
        debug!("装载选课判定所需数据快照");

        let student = self
            .repos
            .student_repo
            .find_by_id(student_id)?
            .ok_or(EnrollmentError::StudentNotFound(student_id))?;

        let course = self
            .repos
            .course_repo
            .find_by_id(course_id)?
            .ok_or(EnrollmentError::CourseNotFound(course_id))?;

        let course_sections = self
            .repos
            .section_repo
            .find_by_course_id_and_semester_id(course_id, active_semester.id)?;
        let target_section = course_sections
            .iter()
            .find(|section| section.id == section_id)
            .cloned()
            .ok_or(EnrollmentError::CourseSectionNotFound(section_id))?;

        let current_semester_enrollments = self
            .repos
            .enrollment_repo
            .find_by_student_id_and_semester_id(student_id, active_semester.id)?;
        let course_history = self
            .repos
            .course_history_repo
            .find_by_student_id(student_id)?;
        let current_enrollment_sections = self
            .find_current_enrollment_sections(&current_semester_enrollments, active_semester.id)?;

        // === 步骤4: 资格判定 ===
        let ctx = EligibilityContext {
            student: &student,
            course: &course,
            target_section: &target_section,
            active_semester: &active_semester,
            current_semester_enrollments: &current_semester_enrollments,
            course_history: &course_history,
            current_enrollment_sections: &current_enrollment_sections,
            earned_credits: None,
        };
        self.eligibility.can_enroll(&ctx).await?;

        // === 步骤5: 持久化并富化 ===
        let enrollment = self.repos.enrollment_repo.save(&NewEnrollment {
            student_id,
            course_id,
            section_id,
            semester_id: active_semester.id,
        })?;

        info!(enrollment_id = enrollment.id, "选课创建成功");
        self.to_enrollment_detail(&enrollment, &active_semester)
    }

    /// 删除选课 (退课)
    ///
    /// # 流程
    /// 1. 解析激活学期; 缺失 -> ActiveSemesterNotFound
    /// 2. 查找在册选课; 缺失 -> EnrollmentNotFound
    /// 3. 退课资格判定; 失败 -> 拒绝 (reason=other)
    /// 4. 删除并返回删除前的富化表示
    #[instrument(skip(self))]
    pub async fn delete_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<EnrollmentDetail, EnrollmentError> {
        info!(student_id, course_id, "开始处理退课请求");

        let _write_gate = self.repos.write_gate.lock().await;

        // === 步骤1: 解析激活学期 ===
        let active_semester = self
            .repos
            .semester_repo
            .find_active()?
            .ok_or(EnrollmentError::ActiveSemesterNotFound)?;

        // === 步骤2: 查找在册选课 ===
        let enrollment = self
            .repos
            .enrollment_repo
            .find_by_student_id_and_course_id_and_semester_id(
                student_id,
                course_id,
                active_semester.id,
            )?
            .ok_or(EnrollmentError::EnrollmentNotFound {
                student_id,
                course_id,
                semester_id: active_semester.id,
            })?;

        // === 步骤3: 退课资格判定 ===
        if !self.eligibility.can_unenroll(&enrollment, &active_semester) {
            debug!(enrollment_id = enrollment.id, "退课被拒绝: 非激活学期记录");
            return Err(EnrollmentError::Rejected(
                crate::engine::rejection::EligibilityRejection::UnenrollNotAllowed,
            ));
        }

        // === 步骤4: 删除并富化 ===
        let detail = self.to_enrollment_detail(&enrollment, &active_semester)?;
        self.repos.enrollment_repo.delete_by_id(enrollment.id)?;

        info!(enrollment_id = enrollment.id, "退课成功");
        Ok(detail)
    }

    /// 查询学生学业指标 (引擎侧聚合)
    pub fn student_academic_metrics(
        &self,
        student_id: i64,
    ) -> Result<StudentAcademicMetrics, EnrollmentError> {
        self.metrics.calculate_for_student(&self.repos, student_id)
    }

    /// 装配学生当前在册选课对应的教学班列表
    ///
    /// 说明: 仅保留学生实际所在的教学班 (同课程的其他教学班不算)
    fn find_current_enrollment_sections(
        &self,
        current_semester_enrollments: &[Enrollment],
        semester_id: i64,
    ) -> Result<Vec<CourseSection>, EnrollmentError> {
        if current_semester_enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let mut course_ids: Vec<i64> = current_semester_enrollments
            .iter()
            .map(|enrollment| enrollment.course_id)
            .collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let enrolled_section_ids: HashSet<i64> = current_semester_enrollments
            .iter()
            .map(|enrollment| enrollment.section_id)
            .collect();

        let sections = self
            .repos
            .section_repo
            .find_by_course_ids_and_semester_id(&course_ids, semester_id)?;

        Ok(sections
            .into_iter()
            .filter(|section| enrolled_section_ids.contains(&section.id))
            .collect())
    }

    /// 构建富化后的选课表示 (课程 + 教学班 + 教师 + 学期摘要)
    fn to_enrollment_detail(
        &self,
        enrollment: &Enrollment,
        active_semester: &Semester,
    ) -> Result<EnrollmentDetail, EnrollmentError> {
        let course = self
            .repos
            .course_repo
            .find_by_id(enrollment.course_id)?
            .ok_or(EnrollmentError::CourseNotFound(enrollment.course_id))?;

        let sections = self
            .repos
            .section_repo
            .find_by_course_id_and_semester_id(enrollment.course_id, active_semester.id)?;
        let section = sections
            .into_iter()
            .find(|section| section.id == enrollment.section_id)
            .ok_or(EnrollmentError::CourseSectionNotFound(enrollment.section_id))?;

        let teacher = match section.teacher_id {
            Some(teacher_id) => self
                .repos
                .teacher_repo
                .find_by_ids(&[teacher_id])?
                .remove(&teacher_id),
            None => None,
        };

        Ok(EnrollmentDetail {
            enrollment: enrollment.clone(),
            course,
            section,
            teacher,
            semester: SemesterSummary::from(active_semester),
        })
    }
}
