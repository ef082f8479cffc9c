//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use offer_shared::database::Database;

use crate::repository::OfferStore;

/// Axum 应用共享状态
///
/// 启动时构造一次，通过 Clone 在 handler 间共享（内部均为连接池句柄）
#[derive(Clone)]
pub struct AppState {
    /// 数据库连接池，用于就绪检查
    pub db: Database,
    /// Offer 存储，handler 通过它打开请求级会话
    pub store: OfferStore,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(db: Database) -> Self {
        let store = OfferStore::new(db.pool().clone());
        Self { db, store }
    }
}
