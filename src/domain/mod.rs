// ==========================================
// Maplewood 选课系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod course;
pub mod course_history;
pub mod enrollment;
pub mod section;
pub mod semester;
pub mod student;
pub mod teacher;
pub mod types;

// 重导出核心类型
pub use course::Course;
pub use course_history::CourseHistory;
pub use enrollment::{Enrollment, NewEnrollment};
pub use section::{CourseSection, MeetingTime};
pub use semester::{Semester, SemesterSummary};
pub use student::{Student, StudentAcademicMetrics};
pub use teacher::Teacher;
pub use types::DayOfWeek;
