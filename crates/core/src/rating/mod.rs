//! Rating module - resolution of the composite rating factor.

mod rating_errors;
mod rating_model;
mod rating_service;
mod rating_traits;

pub use rating_errors::RatingError;
pub use rating_model::{RatingAnomaly, RatingResult};
pub use rating_service::RatingService;
pub use rating_traits::RatingServiceTrait;
