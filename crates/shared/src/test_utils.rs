//! 测试工具模块
//!
//! 提供集成测试所需的辅助函数和测试数据生成器。

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::DatabaseConfig;
use crate::database::Database;

// ==================== 测试配置辅助 ====================

/// 创建测试用数据库配置
///
/// 使用内存 SQLite；内存库随连接销毁，所以连接池固定为单连接且不回收
pub fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_seconds: 5,
        idle_timeout_seconds: 3600,
    }
}

/// 连接测试数据库
pub async fn test_database() -> Database {
    Database::connect(&test_database_config())
        .await
        .expect("连接测试数据库失败")
}

/// 生成唯一的测试标题
///
/// 使用原子计数器确保并行测试时的唯一性
pub fn test_title(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("{}-{}", prefix, COUNTER.fetch_add(1, Ordering::SeqCst))
}
