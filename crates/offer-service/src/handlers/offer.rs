//! Offer API 处理器
//!
//! 实现 offer 的列表、创建、整体替换和删除。
//! 每个请求在提取（校验）通过后打开一个存储会话，成功时提交，
//! 其余路径随会话 drop 回滚并释放连接。

use axum::{Json, extract::State};
use offer_shared::observability::metrics::record_offer_operation;
use tracing::info;

use crate::{
    dto::{DeletedResponse, OfferFilter, OfferPayload},
    error::ApiError,
    extract::{AppJson, AppPath, AppQuery},
    models::{Offer, OfferFields},
    state::AppState,
};

/// 获取 offer 列表
///
/// GET /offers?category=...
pub async fn list_offers(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<OfferFilter>,
) -> Result<Json<Vec<Offer>>, ApiError> {
    let mut session = state.store.session().await?;
    let offers = session.list(filter.category()).await?;
    session.commit().await?;

    record_offer_operation("list", "ok");

    Ok(Json(offers))
}

/// 创建 offer
///
/// POST /offers
pub async fn create_offer(
    State(state): State<AppState>,
    AppJson(req): AppJson<OfferPayload>,
) -> Result<Json<Offer>, ApiError> {
    let fields = OfferFields::from(req);

    let mut session = state.store.session().await?;
    let offer = session.insert(&fields).await?;
    session.commit().await?;

    record_offer_operation("create", "ok");
    info!(offer_id = offer.id, category = %offer.category, "Offer created");

    Ok(Json(offer))
}

/// 整体替换 offer
///
/// PUT /offers/{offer_id}
pub async fn update_offer(
    State(state): State<AppState>,
    AppPath(offer_id): AppPath<i64>,
    AppJson(req): AppJson<OfferPayload>,
) -> Result<Json<Offer>, ApiError> {
    let fields = OfferFields::from(req);

    let mut session = state.store.session().await?;
    let Some(offer) = session.replace(offer_id, &fields).await? else {
        record_offer_operation("update", "not_found");
        return Err(ApiError::OfferNotFound(offer_id));
    };
    session.commit().await?;

    record_offer_operation("update", "ok");
    info!(offer_id, "Offer updated");

    Ok(Json(offer))
}

/// 删除 offer
///
/// DELETE /offers/{offer_id}
pub async fn delete_offer(
    State(state): State<AppState>,
    AppPath(offer_id): AppPath<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let mut session = state.store.session().await?;
    if !session.delete(offer_id).await? {
        record_offer_operation("delete", "not_found");
        return Err(ApiError::OfferNotFound(offer_id));
    }
    session.commit().await?;

    record_offer_operation("delete", "ok");
    info!(offer_id, "Offer deleted");

    Ok(Json(DeletedResponse::success()))
}
