// ==========================================
// Maplewood 选课系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 提供时段冲突判定与七条选课资格规则的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 规则按固定顺序执行, 首条失败即返回, 决定对外拒绝原因
// ==========================================

use crate::domain::types::is_passed_status;
use crate::domain::{Course, CourseHistory, CourseSection, Enrollment, MeetingTime, Semester, Student};
use crate::engine::rejection::EligibilityRejection;

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 将 "HH:MM" 转换为可排序整数 (如 "09:30" -> 930)
    ///
    /// # 规则
    /// - 缺失或不含 ':' 的值 -> None
    /// - 去掉 ':' 后无法解析为整数 -> None
    ///
    /// 说明: 返回 None 属防御性默认 (时段不参与冲突), 不做输入校验层
    pub fn time_to_number(time: Option<&str>) -> Option<i32> {
        let time = time?;
        if !time.contains(':') {
            return None;
        }
        time.replace(':', "").parse::<i32>().ok()
    }

    /// 判定两个每周时段是否重叠
    ///
    /// # 规则
    /// - 任一时段未设星期几, 或星期几不同 -> false
    /// - 任一时间字符串非法 -> false
    /// - 半开区间比较: startA < endB && endA > startB (端点相接不算重叠)
    pub fn overlaps(first: &MeetingTime, second: &MeetingTime) -> bool {
        let (day_first, day_second) = match (first.day_of_week, second.day_of_week) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if day_first != day_second {
            return false;
        }

        let start_first = Self::time_to_number(first.start_time.as_deref());
        let end_first = Self::time_to_number(first.end_time.as_deref());
        let start_second = Self::time_to_number(second.start_time.as_deref());
        let end_second = Self::time_to_number(second.end_time.as_deref());

        match (start_first, end_first, start_second, end_second) {
            (Some(sa), Some(ea), Some(sb), Some(eb)) => sa < eb && ea > sb,
            _ => false,
        }
    }

    /// 判定目标教学班与已选教学班列表是否存在时段冲突
    ///
    /// # 规则
    /// - 目标无时段或已选列表为空 -> false
    /// - 任意目标时段与任意已选时段重叠 -> true
    pub fn sections_overlap(target: &CourseSection, enrolled: &[CourseSection]) -> bool {
        if target.meeting_times.is_empty() || enrolled.is_empty() {
            return false;
        }

        enrolled.iter().any(|section| {
            section.meeting_times.iter().any(|enrolled_meeting| {
                target
                    .meeting_times
                    .iter()
                    .any(|target_meeting| Self::overlaps(target_meeting, enrolled_meeting))
            })
        })
    }

    // ==========================================
    // 七条资格规则的独立判定
    // ==========================================

    /// 规则1: 目标教学班是否属于激活学期
    pub fn is_current_semester_section(target: &CourseSection, active: &Semester) -> bool {
        target.semester_id == active.id
    }

    /// 规则2: 是否已达单学期选课上限
    pub fn has_reached_enrollment_limit(
        current_enrollments: &[Enrollment],
        max_courses: i64,
    ) -> bool {
        current_enrollments.len() as i64 >= max_courses
    }

    /// 规则3: 是否已修读通过该课程
    pub fn has_already_passed_course(course: &Course, history: &[CourseHistory]) -> bool {
        history
            .iter()
            .any(|record| record.course_id == course.id && is_passed_status(&record.status))
    }

    /// 规则4: 是否已修满毕业学分
    ///
    /// # 参数
    /// - earned_credits: None 表示不启用本规则
    pub fn has_reached_graduation_credits(
        earned_credits: Option<f64>,
        required_credits: f64,
    ) -> bool {
        match earned_credits {
            Some(credits) => credits >= required_credits,
            None => false,
        }
    }

    /// 规则5: 学生年级是否满足课程年级区间
    ///
    /// # 规则
    /// - 学生年级未设 -> false (保守判不合格)
    /// - 区间端点缺失视为该端不限
    pub fn is_student_grade_level_eligible(student: &Student, course: &Course) -> bool {
        let grade_level = match student.grade_level {
            Some(level) => level,
            None => return false,
        };

        if let Some(min) = course.grade_level_min {
            if grade_level < min {
                return false;
            }
        }
        if let Some(max) = course.grade_level_max {
            if grade_level > max {
                return false;
            }
        }

        true
    }

    /// 规则6: 先修课程是否已通过
    ///
    /// # 规则
    /// - 课程无先修要求 -> true
    /// - 历史中存在先修课程的 "passed" 记录 -> true; 否则 false
    pub fn has_passed_prerequisite(course: &Course, history: &[CourseHistory]) -> bool {
        let prerequisite_id = match course.prerequisite_id {
            Some(id) => id,
            None => return true,
        };

        history
            .iter()
            .any(|record| record.course_id == prerequisite_id && is_passed_status(&record.status))
    }

    /// 按固定顺序执行全部资格规则
    ///
    /// # 顺序
    /// 学期匹配 -> 选课上限 -> 已修通过 -> 毕业学分 -> 年级 -> 先修 -> 时段冲突
    ///
    /// # 返回
    /// - `Ok(())`: 全部规则通过
    /// - `Err(EligibilityRejection)`: 首条未通过规则对应的拒绝
    #[allow(clippy::too_many_arguments)]
    pub fn check_enrollment(
        student: &Student,
        course: &Course,
        target_section: &CourseSection,
        active_semester: &Semester,
        current_semester_enrollments: &[Enrollment],
        course_history: &[CourseHistory],
        current_enrollment_sections: &[CourseSection],
        max_courses_per_semester: i64,
        required_graduation_credits: f64,
        earned_credits: Option<f64>,
    ) -> Result<(), EligibilityRejection> {
        if !Self::is_current_semester_section(target_section, active_semester) {
            return Err(EligibilityRejection::NotActiveSemester);
        }

        if Self::has_reached_enrollment_limit(current_semester_enrollments, max_courses_per_semester)
        {
            return Err(EligibilityRejection::MaxCoursesReached {
                limit: max_courses_per_semester,
            });
        }

        if Self::has_already_passed_course(course, course_history) {
            return Err(EligibilityRejection::AlreadyPassed);
        }

        if Self::has_reached_graduation_credits(earned_credits, required_graduation_credits) {
            return Err(EligibilityRejection::GraduationCreditsReached);
        }

        if !Self::is_student_grade_level_eligible(student, course) {
            return Err(EligibilityRejection::GradeLevelNotEligible);
        }

        if !Self::has_passed_prerequisite(course, course_history) {
            // 仅当课程确有先修要求时才会走到这里
            let prerequisite_course_id = course.prerequisite_id.unwrap_or_default();
            return Err(EligibilityRejection::MissingPrerequisite {
                prerequisite_course_id,
            });
        }

        if Self::sections_overlap(target_section, current_enrollment_sections) {
            return Err(EligibilityRejection::ScheduleConflict);
        }

        Ok(())
    }

    /// 退课资格判定
    ///
    /// # 规则
    /// - 仅允许退激活学期的在册选课; 历史记录不可删除
    pub fn can_unenroll(enrollment: &Enrollment, active_semester: &Semester) -> bool {
        enrollment.semester_id == active_semester.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayOfWeek;
    use chrono::Utc;

    // ==========================================
    // 测试辅助函数
    // ==========================================
    fn meeting(day: DayOfWeek, start: &str, end: &str) -> MeetingTime {
        MeetingTime::new(day, start, end)
    }

    fn section_with_meetings(id: i64, semester_id: i64, meetings: Vec<MeetingTime>) -> CourseSection {
        CourseSection {
            id,
            course_id: 1,
            semester_id,
            teacher_id: Some(1),
            classroom_id: None,
            capacity: Some(30),
            enrolled_count: Some(0),
            meeting_times: meetings,
        }
    }

    fn test_student(grade_level: Option<i64>) -> Student {
        Student {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: None,
            grade_level,
            enrollment_year: Some(2024),
            expected_graduation_year: Some(2028),
            status: Some("active".to_string()),
            created_at: Utc::now(),
        }
    }

    fn test_course(id: i64) -> Course {
        Course {
            id,
            code: Some(format!("C{id:03}")),
            name: format!("Course {id}"),
            description: None,
            credits: Some(3.0),
            hours_per_week: Some(3),
            prerequisite_id: None,
            grade_level_min: None,
            grade_level_max: None,
            created_at: None,
        }
    }

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

    fn enrollment_row(course_id: i64, section_id: i64, semester_id: i64) -> Enrollment {
        Enrollment {
            id: course_id * 10,
            student_id: 1,
            course_id,
            section_id,
            semester_id,
            created_at: None,
        }
    }

    fn active_semester(id: i64) -> Semester {
        Semester {
            id,
            name: "Fall 2025".to_string(),
            year: Some(2025),
            order_in_year: Some(1),
            start_date: None,
            end_date: None,
            is_active: true,
            created_at: None,
        }
    }

    // ==========================================
    // time_to_number
    // ==========================================

    #[test]
    fn test_time_to_number_valid() {
        assert_eq!(EligibilityCore::time_to_number(Some("09:30")), Some(930));
        assert_eq!(EligibilityCore::time_to_number(Some("10:00")), Some(1000));
        assert_eq!(EligibilityCore::time_to_number(Some("00:05")), Some(5));
    }

    #[test]
    fn test_time_to_number_malformed() {
        assert_eq!(EligibilityCore::time_to_number(None), None);
        assert_eq!(EligibilityCore::time_to_number(Some("0930")), None); // 无分隔符
        assert_eq!(EligibilityCore::time_to_number(Some("ab:cd")), None);
        assert_eq!(EligibilityCore::time_to_number(Some("")), None);
    }

    // ==========================================
    // overlaps
    // ==========================================

    #[test]
    fn test_overlaps_shared_endpoint_is_not_overlap() {
        // 一班 09:00-10:00, 另一班 10:00-11:00: 端点相接不算冲突
        let a = meeting(DayOfWeek::Monday, "09:00", "10:00");
        let b = meeting(DayOfWeek::Monday, "10:00", "11:00");
        assert!(!EligibilityCore::overlaps(&a, &b));
        assert!(!EligibilityCore::overlaps(&b, &a));
    }

    #[test]
    fn test_overlaps_genuine_overlap_and_symmetry() {
        let a = meeting(DayOfWeek::Monday, "09:00", "10:30");
        let b = meeting(DayOfWeek::Monday, "10:00", "11:00");
        assert!(EligibilityCore::overlaps(&a, &b));
        assert!(EligibilityCore::overlaps(&b, &a));
    }

    #[test]
    fn test_overlaps_containment() {
        let outer = meeting(DayOfWeek::Tuesday, "08:00", "12:00");
        let inner = meeting(DayOfWeek::Tuesday, "09:00", "10:00");
        assert!(EligibilityCore::overlaps(&outer, &inner));
        assert!(EligibilityCore::overlaps(&inner, &outer));
    }

    #[test]
    fn test_overlaps_different_day() {
        let a = meeting(DayOfWeek::Monday, "09:00", "10:00");
        let b = meeting(DayOfWeek::Tuesday, "09:00", "10:00");
        assert!(!EligibilityCore::overlaps(&a, &b));
    }

    #[test]
    fn test_overlaps_missing_day_or_malformed_time() {
        let mut a = meeting(DayOfWeek::Monday, "09:00", "10:00");
        let b = meeting(DayOfWeek::Monday, "09:30", "10:30");

        a.day_of_week = None;
        assert!(!EligibilityCore::overlaps(&a, &b));

        let c = MeetingTime {
            day_of_week: Some(DayOfWeek::Monday),
            start_time: Some("bogus".to_string()),
            end_time: Some("10:00".to_string()),
        };
        assert!(!EligibilityCore::overlaps(&c, &b));
    }

    // ==========================================
    // sections_overlap
    // ==========================================

    #[test]
    fn test_sections_overlap_empty_lists() {
        let target = section_with_meetings(1, 1, vec![meeting(DayOfWeek::Monday, "09:00", "10:00")]);
        assert!(!EligibilityCore::sections_overlap(&target, &[]));

        let no_meetings = section_with_meetings(2, 1, vec![]);
        let enrolled = vec![target.clone()];
        assert!(!EligibilityCore::sections_overlap(&no_meetings, &enrolled));
    }

    #[test]
    fn test_sections_overlap_any_pair() {
        let target = section_with_meetings(
            1,
            1,
            vec![
                meeting(DayOfWeek::Monday, "09:00", "10:00"),
                meeting(DayOfWeek::Wednesday, "14:00", "15:00"),
            ],
        );
        let enrolled = vec![
            section_with_meetings(2, 1, vec![meeting(DayOfWeek::Tuesday, "09:00", "10:00")]),
            section_with_meetings(3, 1, vec![meeting(DayOfWeek::Wednesday, "14:30", "15:30")]),
        ];
        assert!(EligibilityCore::sections_overlap(&target, &enrolled));
    }

    #[test]
    fn test_sections_overlap_no_conflict() {
        let target = section_with_meetings(1, 1, vec![meeting(DayOfWeek::Monday, "09:00", "10:00")]);
        let enrolled = vec![
            section_with_meetings(2, 1, vec![meeting(DayOfWeek::Monday, "10:00", "11:00")]),
            section_with_meetings(3, 1, vec![meeting(DayOfWeek::Friday, "09:00", "10:00")]),
        ];
        assert!(!EligibilityCore::sections_overlap(&target, &enrolled));
    }

    // ==========================================
    // 单条规则判定
    // ==========================================

    #[test]
    fn test_grade_level_bounds() {
        let mut course = test_course(1);
        course.grade_level_min = Some(9);
        course.grade_level_max = Some(10);

        assert!(EligibilityCore::is_student_grade_level_eligible(
            &test_student(Some(10)),
            &course
        ));
        assert!(!EligibilityCore::is_student_grade_level_eligible(
            &test_student(Some(11)),
            &course
        ));
        assert!(!EligibilityCore::is_student_grade_level_eligible(
            &test_student(Some(8)),
            &course
        ));
        // 年级未设: 保守判不合格
        assert!(!EligibilityCore::is_student_grade_level_eligible(
            &test_student(None),
            &course
        ));
    }

    #[test]
    fn test_grade_level_unbounded_sides() {
        let mut course = test_course(1);
        course.grade_level_min = Some(11);
        course.grade_level_max = None;
        assert!(EligibilityCore::is_student_grade_level_eligible(
            &test_student(Some(12)),
            &course
        ));

        course.grade_level_min = None;
        course.grade_level_max = None;
        assert!(EligibilityCore::is_student_grade_level_eligible(
            &test_student(Some(9)),
            &course
        ));
    }

    #[test]
    fn test_prerequisite_checks() {
        let mut course = test_course(2);
        assert!(EligibilityCore::has_passed_prerequisite(&course, &[]));

        course.prerequisite_id = Some(7);
        assert!(!EligibilityCore::has_passed_prerequisite(&course, &[]));
        assert!(!EligibilityCore::has_passed_prerequisite(
            &course,
            &[history_row(7, "failed")]
        ));
        assert!(EligibilityCore::has_passed_prerequisite(
            &course,
            &[history_row(7, "passed")]
        ));
        // 状态比较不区分大小写
        assert!(EligibilityCore::has_passed_prerequisite(
            &course,
            &[history_row(7, "PASSED")]
        ));
        // 其他课程的通过记录不算
        assert!(!EligibilityCore::has_passed_prerequisite(
            &course,
            &[history_row(8, "passed")]
        ));
    }

    #[test]
    fn test_already_passed_course() {
        let course = test_course(3);
        assert!(!EligibilityCore::has_already_passed_course(&course, &[]));
        assert!(!EligibilityCore::has_already_passed_course(
            &course,
            &[history_row(3, "failed")]
        ));
        assert!(EligibilityCore::has_already_passed_course(
            &course,
            &[history_row(3, "Passed")]
        ));
    }

    #[test]
    fn test_graduation_credits_rule() {
        assert!(!EligibilityCore::has_reached_graduation_credits(None, 30.0));
        assert!(!EligibilityCore::has_reached_graduation_credits(Some(29.5), 30.0));
        assert!(EligibilityCore::has_reached_graduation_credits(Some(30.0), 30.0));
        assert!(EligibilityCore::has_reached_graduation_credits(Some(31.0), 30.0));
    }

    #[test]
    fn test_enrollment_limit_boundary() {
        let enrollments: Vec<Enrollment> = (1..=4)
            .map(|i| enrollment_row(i, i * 100, 1))
            .collect();
        // 4 < 5: 未达上限
        assert!(!EligibilityCore::has_reached_enrollment_limit(&enrollments, 5));

        let full: Vec<Enrollment> = (1..=5)
            .map(|i| enrollment_row(i, i * 100, 1))
            .collect();
        assert!(EligibilityCore::has_reached_enrollment_limit(&full, 5));
    }

    // ==========================================
    // check_enrollment - 固定顺序全量判定
    // ==========================================

    #[test]
    fn test_check_enrollment_happy_path() {
        // 年级10学生, 课程区间 [9,10], 无先修, 无已选, 目标在激活学期, 无冲突
        let student = test_student(Some(10));
        let mut course = test_course(1);
        course.grade_level_min = Some(9);
        course.grade_level_max = Some(10);
        let target = section_with_meetings(1, 1, vec![meeting(DayOfWeek::Monday, "09:00", "10:00")]);

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[],
            &[],
            &[],
            5,
            30.0,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_enrollment_already_passed() {
        let student = test_student(Some(10));
        let mut course = test_course(1);
        course.grade_level_min = Some(9);
        course.grade_level_max = Some(10);
        let target = section_with_meetings(1, 1, vec![meeting(DayOfWeek::Monday, "09:00", "10:00")]);

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[],
            &[history_row(1, "passed")],
            &[],
            5,
            30.0,
            None,
        );
        assert_eq!(result, Err(EligibilityRejection::AlreadyPassed));
    }

    #[test]
    fn test_check_enrollment_term_mismatch_first() {
        // 目标教学班在旧学期, 即使其他规则也不满足, 也应先报学期不匹配
        let student = test_student(None);
        let course = test_course(1);
        let target = section_with_meetings(1, 99, vec![]);

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[],
            &[],
            &[],
            5,
            30.0,
            None,
        );
        assert_eq!(result, Err(EligibilityRejection::NotActiveSemester));
    }

    #[test]
    fn test_check_enrollment_limit_before_passed() {
        // 上限规则先于已修通过规则
        let student = test_student(Some(10));
        let course = test_course(1);
        let target = section_with_meetings(1, 1, vec![]);
        let enrollments: Vec<Enrollment> = (10..15)
            .map(|i| enrollment_row(i, i * 100, 1))
            .collect();

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &enrollments,
            &[history_row(1, "passed")],
            &[],
            5,
            30.0,
            None,
        );
        assert_eq!(result, Err(EligibilityRejection::MaxCoursesReached { limit: 5 }));
    }

    #[test]
    fn test_check_enrollment_prerequisite_payload() {
        let student = test_student(Some(10));
        let mut course = test_course(2);
        course.prerequisite_id = Some(7);
        let target = section_with_meetings(1, 1, vec![]);

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[],
            &[],
            &[],
            5,
            30.0,
            None,
        );
        assert_eq!(
            result,
            Err(EligibilityRejection::MissingPrerequisite {
                prerequisite_course_id: 7
            })
        );
    }

    #[test]
    fn test_check_enrollment_conflict_last() {
        let student = test_student(Some(10));
        let course = test_course(1);
        let target = section_with_meetings(1, 1, vec![meeting(DayOfWeek::Monday, "09:00", "10:00")]);
        let enrolled_sections =
            vec![section_with_meetings(2, 1, vec![meeting(DayOfWeek::Monday, "09:30", "10:30")])];

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[enrollment_row(9, 2, 1)],
            &[],
            &enrolled_sections,
            5,
            30.0,
            None,
        );
        assert_eq!(result, Err(EligibilityRejection::ScheduleConflict));
    }

    #[test]
    fn test_check_enrollment_graduation_credits() {
        let student = test_student(Some(12));
        let course = test_course(1);
        let target = section_with_meetings(1, 1, vec![]);

        let result = EligibilityCore::check_enrollment(
            &student,
            &course,
            &target,
            &active_semester(1),
            &[],
            &[],
            &[],
            5,
            30.0,
            Some(30.0),
        );
        assert_eq!(result, Err(EligibilityRejection::GraduationCreditsReached));
    }

    // ==========================================
    // can_unenroll
    // ==========================================

    #[test]
    fn test_can_unenroll() {
        let active = active_semester(2);
        assert!(EligibilityCore::can_unenroll(&enrollment_row(1, 10, 2), &active));
        // 非激活学期的记录不可退
        assert!(!EligibilityCore::can_unenroll(&enrollment_row(1, 10, 1), &active));
    }
}
