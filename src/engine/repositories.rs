// ==========================================
// Maplewood 选课系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合选课编排所需的所有 Repository
// 目标: 减少 EnrollmentOrchestrator 的构造函数参数数量
// ==========================================

use std::sync::{Arc, Mutex};

use crate::repository::{
    CourseHistoryRepository, CourseRepository, CourseSectionRepository, EnrollmentRepository,
    SemesterRepository, StudentRepository, TeacherRepository,
};
use rusqlite::Connection;
use tokio::sync::Mutex as AsyncMutex;

/// 选课编排仓储集合
///
/// 聚合选课编排所需的所有 Repository，简化依赖注入。
///
/// # 包含的仓储
/// - `student_repo`: 学生主数据
/// - `course_repo`: 课程目录
/// - `section_repo`: 教学班
/// - `semester_repo`: 学期
/// - `enrollment_repo`: 在册选课
/// - `course_history_repo`: 课程历史
/// - `teacher_repo`: 教师 (仅富化)
///
/// # 写入门闩
/// 单个仓储调用只在调用期间持有连接锁, 跨调用的 "检查在册 -> 资格判定 -> 写入"
/// 序列需要 `write_gate` 保护: 编排器在整个序列期间持有门闩, 同一仓储集合上的
/// 并发选课/退课请求串行执行, 计数类规则不会被竞态绕过
#[derive(Clone)]
pub struct EnrollmentRepositories {
    pub student_repo: Arc<StudentRepository>,
    pub course_repo: Arc<CourseRepository>,
    pub section_repo: Arc<CourseSectionRepository>,
    pub semester_repo: Arc<SemesterRepository>,
    pub enrollment_repo: Arc<EnrollmentRepository>,
    pub course_history_repo: Arc<CourseHistoryRepository>,
    pub teacher_repo: Arc<TeacherRepository>,
    /// 请求级写入门闩 (异步锁, 允许跨 await 持有)
    pub write_gate: Arc<AsyncMutex<()>>,
}

impl EnrollmentRepositories {
    /// 创建新的仓储集合
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_repo: Arc<StudentRepository>,
        course_repo: Arc<CourseRepository>,
        section_repo: Arc<CourseSectionRepository>,
        semester_repo: Arc<SemesterRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
        course_history_repo: Arc<CourseHistoryRepository>,
        teacher_repo: Arc<TeacherRepository>,
    ) -> Self {
        Self {
            student_repo,
            course_repo,
            section_repo,
            semester_repo,
            enrollment_repo,
            course_history_repo,
            teacher_repo,
            write_gate: Arc::new(AsyncMutex::new(())),
        }
    }

    /// 从单一数据库连接构建全部仓储
    ///
    /// 说明: 全部仓储共享同一把连接锁; 跨仓储调用的原子性由 `write_gate` 保证
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            student_repo: Arc::new(StudentRepository::new(conn.clone())),
            course_repo: Arc::new(CourseRepository::new(conn.clone())),
            section_repo: Arc::new(CourseSectionRepository::new(conn.clone())),
            semester_repo: Arc::new(SemesterRepository::new(conn.clone())),
            enrollment_repo: Arc::new(EnrollmentRepository::new(conn.clone())),
            course_history_repo: Arc::new(CourseHistoryRepository::new(conn.clone())),
            teacher_repo: Arc::new(TeacherRepository::new(conn)),
            write_gate: Arc::new(AsyncMutex::new(())),
        }
    }
}
