//! Offer 实体
//!
//! 折扣/促销信息的唯一持久化记录类型，对应 `offers` 表。

use serde::{Deserialize, Serialize};

/// 持久化的 offer 记录
///
/// `id` 由存储层在插入时分配，之后保持不变；其余字段均无约束。
/// 日期字段按不透明文本存储，不做解析。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub city: String,
    pub discount: i64,
    pub price: i64,
    pub popularity: i64,
    pub start_date: String,
    pub end_date: String,
}

/// 写入 offer 所需的全部字段（不含 id）
///
/// 创建和整体替换更新共用同一形状
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferFields {
    pub title: String,
    pub category: String,
    pub city: String,
    pub discount: i64,
    pub price: i64,
    pub popularity: i64,
    pub start_date: String,
    pub end_date: String,
}
