// ==========================================
// Maplewood 选课系统 - 选课配置读取 Trait
// ==========================================
// 职责: 定义选课引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// EnrollmentConfigReader Trait
// ==========================================
// 用途: 选课引擎所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait EnrollmentConfigReader: Send + Sync {
    /// 获取单学期最大选课数
    ///
    /// # 默认值
    /// - 5
    async fn get_max_courses_per_semester(&self) -> Result<i64, Box<dyn Error>>;

    /// 获取毕业所需学分
    ///
    /// # 默认值
    /// - 30.0
    async fn get_required_graduation_credits(&self) -> Result<f64, Box<dyn Error>>;
}
