// ==========================================
// 并发控制测试
// ==========================================
// 职责: 验证选课请求的写入门闩串行化
// 场景: 并发创建不得绕过选课数量上限 / 不得产生重复选课
// ==========================================


use maplewood_enrollment::config::config_keys;
use maplewood_enrollment::domain::MeetingTime;
use maplewood_enrollment::{
    DayOfWeek, EligibilityRejection, EnrollmentError, EnrollmentOrchestrator,
};
use std::error::Error;
use std::sync::Arc;
use test_helpers::*;
use tokio::sync::Barrier;

// ==========================================
// 测试1: 并发创建不得绕过选课上限
// ==========================================
// 上限为 1 时, 两个同时到达的不同课程的选课请求只能成功一个;
// 落库的在册选课必须恰好一条
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_creates_respect_limit() -> Result<(), Box<dyn Error>> {
    let env = create_test_env()?;
    env.config
        .set_global_config_value(config_keys::MAX_COURSES_PER_SEMESTER, "1")?;

    let semester_id = seed_active_semester(&env.repos)?;
    let student_id = seed_student(&env.repos, Some(10))?;

    let mut targets = Vec::new();
    for (i, day) in [DayOfWeek::Monday, DayOfWeek::Tuesday].iter().enumerate() {
        let course_id = seed_course(&env.repos, &format!("C{i}"), Some(3.0), None, None, None)?;
        let section_id = seed_section(
            &env.repos,
            course_id,
            semester_id,
            None,
            vec![MeetingTime::new(*day, "09:00", "10:00")],
        )?;
        targets.push((course_id, section_id));
    }

    let orch = Arc::new(EnrollmentOrchestrator::new(
        env.repos.clone(),
        env.config.clone(),
    ));
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = Vec::new();
    for (course_id, section_id) in targets {
        let orch = orch.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            orch.create_enrollment(student_id, course_id, section_id).await
        }));
    }

    let mut ok_count = 0;
    let mut limit_rejections = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => ok_count += 1,
            Err(EnrollmentError::Rejected(EligibilityRejection::MaxCoursesReached {
                limit,
            })) => {
                assert_eq!(limit, 1);
                limit_rejections += 1;
            }
            Err(other) => panic!("意外结果: {other:?}"),
        }
    }
    assert_eq!(ok_count, 1);
    assert_eq!(limit_rejections, 1);

    let enrollments = env
        .repos
        .enrollment_repo
        .find_by_student_id_and_semester_id(student_id, semester_id)?;
    assert_eq!(enrollments.len(), 1);
    Ok(())
}

// ==========================================
// 测试2: 并发创建同一课程只落一条记录
// ==========================================
// 两个同时到达的相同请求: 一个插入, 一个幂等返回同一记录
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_creates_same_course_idempotent() -> Result<(), Box<dyn Error>> {
    let env = create_test_env()?;
    let semester_id = seed_active_semester(&env.repos)?;
    let student_id = seed_student(&env.repos, Some(10))?;
    let course_id = seed_course(&env.repos, "MATH101", Some(3.0), None, None, None)?;
    let section_id = seed_section(
        &env.repos,
        course_id,
        semester_id,
        None,
        vec![MeetingTime::new(DayOfWeek::Monday, "09:00", "10:00")],
    )?;

    let orch = Arc::new(EnrollmentOrchestrator::new(
        env.repos.clone(),
        env.config.clone(),
    ));
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = Vec::new();
    for _ in 0..2 {
        let orch = orch.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            orch.create_enrollment(student_id, course_id, section_id).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??.enrollment.id);
    }
    assert_eq!(ids[0], ids[1]);

    let enrollments = env
        .repos
        .enrollment_repo
        .find_by_student_id_and_semester_id(student_id, semester_id)?;
    assert_eq!(enrollments.len(), 1);
    Ok(())
}
