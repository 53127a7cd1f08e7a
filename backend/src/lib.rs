//! # Swiss Rents Backend
//!
//! Data engine behind the Swiss apartment-rents dashboard.
//!
//! The crate loads a cleaned listing table and the Swiss canton boundaries
//! once per process, categorizes every listing into one of four rent buckets,
//! and answers dashboard queries (place, max rent, min rooms) with map,
//! scatter and per-canton bar chart data. An axum server exposes it as a
//! read-only REST API.
//!
//! ## Architecture
//!
//! - [`models`]: listings, rent categories, cantons and boundaries
//! - [`store`]: CSV / GeoJSON loading, normalization and the memoized dataset
//! - [`services`]: the query pipeline (filter, grouping, canton aggregation)
//! - [`routes`]: chart and legend DTOs
//! - [`api`]: public DTO surface
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
