// ==========================================
// Maplewood 选课系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口, 屏蔽数据库细节
// 约束: 所有查询使用参数化, 防止 SQL 注入
// ==========================================

pub mod course_history_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod error;
pub mod section_repo;
pub mod semester_repo;
pub mod student_repo;
pub mod teacher_repo;

// 重导出核心仓储
pub use course_history_repo::CourseHistoryRepository;
pub use course_repo::CourseRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use section_repo::CourseSectionRepository;
pub use semester_repo::SemesterRepository;
pub use student_repo::StudentRepository;
pub use teacher_repo::TeacherRepository;
