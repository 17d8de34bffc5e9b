// ==========================================
// Maplewood 选课系统 - 日志初始化
// ==========================================
// 职责: tracing 订阅器的统一装配
// 说明: 资格拒绝按决策记录 (debug/info), 不按错误记录
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤器
const DEFAULT_FILTER: &str = "info";

/// 初始化日志订阅器 (进程级, 只调用一次)
///
/// # 环境变量
/// - RUST_LOG: 过滤器表达式, 如 `debug` 或 `maplewood_enrollment=trace`
///
/// # 示例
/// ```no_run
/// use maplewood_enrollment::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 测试环境的日志初始化
///
/// 固定 debug 级别并写入测试捕获器; 重复调用安全 (忽略二次注册)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
