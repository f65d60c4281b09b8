//! vfeed - windowing and position-cache engine for virtual scrolling.
//!
//! Maintains the illusion of a multi-million-item scrollable feed while
//! keeping only a small window of items materialized. Item offsets come
//! from a Fenwick-backed position index over measured and default
//! heights; paged loading, persistence, and scroll-jump control sit on
//! top. [`feed::VirtualFeed`] ties the pieces together for a host
//! renderer.

pub mod config;
pub mod control;
pub mod engine;
pub mod feed;
pub mod loader;
pub mod logging;
pub mod model;
pub mod store;

#[cfg(test)]
mod tests;
