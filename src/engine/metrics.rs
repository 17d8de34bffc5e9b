// ==========================================
// Maplewood 选课系统 - 学业指标引擎
// ==========================================
// 职责: 由课程历史 + 课程学分聚合学生学业指标 (已获学分, 绩点)
// 口径: 二元通过制绩点 = ROUND(通过学分 / 全部可解析学分 * 4.0, 2)
// 红线: 分母覆盖全部可解析历史行 (含未通过), 与数据库侧聚合保持一致
// ==========================================

use crate::domain::{CourseHistory, StudentAcademicMetrics};
use crate::engine::error::EnrollmentError;
use crate::engine::repositories::EnrollmentRepositories;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// AcademicMetricsEngine - 学业指标引擎
// ==========================================
pub struct AcademicMetricsEngine;

impl AcademicMetricsEngine {
    /// 创建新的 AcademicMetricsEngine 实例
    pub fn new() -> Self {
        Self
    }

    /// 纯计算: 由历史行与课程学分表聚合学业指标
    ///
    /// # 参数
    /// - history: 学生全部课程历史
    /// - credits_by_course: course_id -> 学分; 不含学分未知的课程
    ///
    /// # 规则
    /// - 课程不可解析 (或学分未知) 的历史行不计入分子与分母
    /// - credits_earned = 通过行学分之和, 截断取整
    /// - 分母为 0 时返回 (0, 0.0)
    pub fn calculate(
        history: &[CourseHistory],
        credits_by_course: &HashMap<i64, f64>,
    ) -> StudentAcademicMetrics {
        let mut passed_credits = 0.0_f64;
        let mut total_credits = 0.0_f64;

        for record in history {
            let credits = match credits_by_course.get(&record.course_id) {
                Some(credits) => *credits,
                None => continue,
            };

            total_credits += credits;
            if record.is_passed() {
                passed_credits += credits;
            }
        }

        if total_credits == 0.0 {
            return StudentAcademicMetrics::zero();
        }

        let gpa = (passed_credits / total_credits * 4.0 * 100.0).round() / 100.0;

        StudentAcademicMetrics {
            credits_earned: passed_credits.trunc() as i64,
            gpa,
        }
    }

    /// 从仓储装载数据并计算学生学业指标
    ///
    /// 说明: 与 CourseHistoryRepository::find_student_academic_metrics 的
    /// 数据库侧聚合口径一致, 供无聚合查询能力的调用方复现
    pub fn calculate_for_student(
        &self,
        repos: &EnrollmentRepositories,
        student_id: i64,
    ) -> Result<StudentAcademicMetrics, EnrollmentError> {
        let history = repos.course_history_repo.find_by_student_id(student_id)?;

        let mut course_ids: Vec<i64> = history.iter().map(|record| record.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let courses = repos.course_repo.find_by_ids(&course_ids)?;
        let credits_by_course: HashMap<i64, f64> = courses
            .iter()
            .filter_map(|(id, course)| course.credits.map(|credits| (*id, credits)))
            .collect();

        let metrics = Self::calculate(&history, &credits_by_course);
        debug!(
            student_id,
            credits_earned = metrics.credits_earned,
            gpa = metrics.gpa,
            "学业指标计算完成"
        );

        Ok(metrics)
    }
}

impl Default for AcademicMetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_row(course_id: i64, status: &str) -> CourseHistory {
        CourseHistory {
            id: 0,
            student_id: 1,
            course_id,
            course_section_id: None,
            semester_id: 1,
            status: status.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_gpa_weighted_by_all_considered_credits() {
        // 学分 [3,3,4], 状态 [passed, passed, failed]
        // credits_earned = 6, gpa = round(6/10*4.0, 2) = 2.4
        let history = vec![
            history_row(1, "passed"),
            history_row(2, "passed"),
            history_row(3, "failed"),
        ];
        let credits: HashMap<i64, f64> = [(1, 3.0), (2, 3.0), (3, 4.0)].into_iter().collect();

        let metrics = AcademicMetricsEngine::calculate(&history, &credits);
        assert_eq!(metrics.credits_earned, 6);
        assert_eq!(metrics.gpa, 2.4);
    }

    #[test]
    fn test_empty_history_yields_zero() {
        let metrics = AcademicMetricsEngine::calculate(&[], &HashMap::new());
        assert_eq!(metrics.credits_earned, 0);
        assert_eq!(metrics.gpa, 0.0);
    }

    #[test]
    fn test_unresolvable_course_rows_are_skipped() {
        // 课程 99 无学分信息: 该行既不进分子也不进分母
        let history = vec![history_row(1, "passed"), history_row(99, "failed")];
        let credits: HashMap<i64, f64> = [(1, 3.0)].into_iter().collect();

        let metrics = AcademicMetricsEngine::calculate(&history, &credits);
        assert_eq!(metrics.credits_earned, 3);
        assert_eq!(metrics.gpa, 4.0);
    }

    #[test]
    fn test_all_failed_yields_zero_gpa() {
        let history = vec![history_row(1, "failed"), history_row(2, "withdrawn")];
        let credits: HashMap<i64, f64> = [(1, 3.0), (2, 4.0)].into_iter().collect();

        let metrics = AcademicMetricsEngine::calculate(&history, &credits);
        assert_eq!(metrics.credits_earned, 0);
        assert_eq!(metrics.gpa, 0.0);
    }

    #[test]
    fn test_fractional_credits_truncate() {
        // 通过学分 3.5: credits_earned 截断为 3
        let history = vec![history_row(1, "passed"), history_row(2, "failed")];
        let credits: HashMap<i64, f64> = [(1, 3.5), (2, 3.5)].into_iter().collect();

        let metrics = AcademicMetricsEngine::calculate(&history, &credits);
        assert_eq!(metrics.credits_earned, 3);
        assert_eq!(metrics.gpa, 2.0);
    }
}
