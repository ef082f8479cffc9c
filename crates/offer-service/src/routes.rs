//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射和全局中间件

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, put},
};
use offer_shared::{config::ServerConfig, observability::middleware as obs_middleware};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::{handlers, state::AppState};

/// 构建 offer 路由
///
/// 写操作（创建、更新、删除）按原有约定不做认证
pub fn offer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/offers",
            get(handlers::offer::list_offers).post(handlers::offer::create_offer),
        )
        .route(
            "/offers/{offer_id}",
            put(handlers::offer::update_offer).delete(handlers::offer::delete_offer),
        )
}

/// 构建探针路由
pub fn probe_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// CORS 配置
///
/// `*` 时放开所有来源；否则按逗号分隔的来源列表限制。方法和头部始终不限制。
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        info!("CORS allowed_origins: * (all origins)");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        CorsLayer::new()
            .allow_origin(parse_origins(allowed_origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// 解析逗号分隔的来源列表，无法解析的来源逐个告警后跳过
fn parse_origins(allowed_origins: &str) -> Vec<HeaderValue> {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!(origin = %s.escape_debug(), error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("No valid CORS origins configured, cross-origin requests will be rejected");
    }

    origins
}

/// 组装完整应用
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(offer_routes())
        .merge(probe_routes())
        .layer(cors_layer(&server.cors_origins))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_invalid_entries() {
        let origins = parse_origins("https://a.example, bad\norigin ,https://b.example,");
        assert_eq!(
            origins,
            vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ]
        );
    }

    #[test]
    fn test_parse_origins_all_invalid() {
        assert!(parse_origins("bad\u{7f}origin, ").is_empty());
    }
}
