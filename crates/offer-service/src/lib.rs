//! Offer 服务
//!
//! 基于单表的 offer 增删改查 REST API。
//!
//! ## 模块结构
//!
//! - `models`: 实体模型（存储层）
//! - `repository`: 建表和请求级存储会话（存储层）
//! - `dto`: 请求和响应的数据传输对象
//! - `extract`: 统一错误结构的请求提取器
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 存储：sqlx + SQLite
//! - 序列化：serde

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

pub use dto::{DeletedResponse, ErrorResponse, OfferFilter, OfferPayload};
pub use error::{ApiError, Result};
pub use models::{Offer, OfferFields};
pub use repository::{OfferSession, OfferStore};
pub use state::AppState;
