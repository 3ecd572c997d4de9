//! Request extractors with rejections mapped to [`AppError`](super::error::AppError).

pub mod json;
