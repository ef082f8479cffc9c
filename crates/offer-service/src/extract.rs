//! 自定义提取器
//!
//! 包装 axum 自带的提取器，使解析失败统一走 [`ApiError::Validation`]，
//! 与其他错误共享同一响应结构。提取均发生在打开存储会话之前。

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON 请求体
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// 路径参数
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// 查询参数
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
