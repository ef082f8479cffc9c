//! 请求 DTO 定义
//!
//! 只做形状校验：字段名、基本类型必须完全匹配，缺字段或多字段（包括 `id`）均拒绝。

use serde::Deserialize;

use crate::models::OfferFields;

/// 创建 / 整体替换 offer 的请求体
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferPayload {
    pub title: String,
    pub category: String,
    pub city: String,
    pub discount: i64,
    pub price: i64,
    pub popularity: i64,
    pub start_date: String,
    pub end_date: String,
}

impl From<OfferPayload> for OfferFields {
    fn from(req: OfferPayload) -> Self {
        Self {
            title: req.title,
            category: req.category,
            city: req.city,
            discount: req.discount,
            price: req.price,
            popularity: req.popularity,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct OfferFilter {
    pub category: Option<String>,
}

impl OfferFilter {
    /// 生效的分类过滤条件
    ///
    /// 空字符串视为未传
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}
