//! 实体模型

pub mod offer;

pub use offer::{Offer, OfferFields};
