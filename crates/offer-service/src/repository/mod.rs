//! 存储层
//!
//! 只负责结构和会话生命周期，不包含业务逻辑，也不感知 HTTP。

pub mod offer_repo;

pub use offer_repo::{OfferSession, OfferStore};
