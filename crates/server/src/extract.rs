//! Extractors whose rejections render as [`AppError`] JSON bodies

use axum::extract::{FromRequestParts, Path, Query};

use crate::error::AppError;

/// `Query` that rejects with a 400 `AppError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `Path` that rejects with a 400 `AppError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
