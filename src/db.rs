// ==========================================
// Maplewood 选课系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 内置 schema, 便于库的使用方与测试自行建库
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 内置数据库 schema
///
/// 约束要点:
/// - enrollments 上的 UNIQUE(student_id, course_id, semester_id) 保证
///   "同一学生同一学期同一课程至多一条在册选课"
/// - student_course_history 只追加, 引擎侧只读
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    grade_level INTEGER,
    enrollment_year INTEGER,
    expected_graduation_year INTEGER,
    status TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teachers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT
);

CREATE TABLE IF NOT EXISTS semesters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    year INTEGER,
    order_in_year INTEGER,
    start_date TEXT,
    end_date TEXT,
    is_active INTEGER NOT NULL DEFAULT 0,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT,
    name TEXT NOT NULL,
    description TEXT,
    credits REAL,
    hours_per_week INTEGER,
    prerequisite_id INTEGER REFERENCES courses(id),
    grade_level_min INTEGER,
    grade_level_max INTEGER,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS course_sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_id INTEGER NOT NULL REFERENCES courses(id),
    semester_id INTEGER NOT NULL REFERENCES semesters(id),
    teacher_id INTEGER REFERENCES teachers(id),
    classroom_id INTEGER,
    capacity INTEGER,
    enrolled_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS section_meeting_times (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section_id INTEGER NOT NULL REFERENCES course_sections(id),
    day_of_week TEXT,
    start_time TEXT,
    end_time TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS enrollments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id),
    course_id INTEGER NOT NULL REFERENCES courses(id),
    section_id INTEGER NOT NULL REFERENCES course_sections(id),
    semester_id INTEGER NOT NULL REFERENCES semesters(id),
    created_at TEXT,
    UNIQUE(student_id, course_id, semester_id)
);

CREATE TABLE IF NOT EXISTS student_course_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id),
    course_id INTEGER NOT NULL REFERENCES courses(id),
    course_section_id INTEGER,
    semester_id INTEGER NOT NULL REFERENCES semesters(id),
    status TEXT NOT NULL,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL DEFAULT 'global',
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (scope_id, key)
);

CREATE INDEX IF NOT EXISTS idx_enrollments_student_semester
    ON enrollments(student_id, semester_id);
CREATE INDEX IF NOT EXISTS idx_history_student
    ON student_course_history(student_id);
CREATE INDEX IF NOT EXISTS idx_sections_course_semester
    ON course_sections(course_id, semester_id);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 打开内存数据库并应用统一配置 (测试与演示用)
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化 schema (幂等)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotent() {
        let conn = open_in_memory_connection().unwrap();
        init_schema(&conn).unwrap();
        // 再次执行不应报错
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='enrollments'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
