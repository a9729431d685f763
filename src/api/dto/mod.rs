//! Data Transfer Objects for the JSON API and the frame action payload.

pub mod frame_dto;
pub mod metrics_dto;

pub use frame_dto::*;
pub use metrics_dto::*;
