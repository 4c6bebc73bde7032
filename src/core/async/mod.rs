//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent replay of operations across
//! independent arenas.
//!
//! - **AsyncArenaRegistry**: Thread-safe arena map using DashMap
//! - **BatchProcessor**: Partitions batches by arena and processes arenas concurrently
//!
//! # Thread Safety
//!
//! - Operations on different arenas proceed in parallel
//! - Operations on the same arena are serialized under one lock, in input order
//! - No global locks - one lock per arena

pub mod batch_processor;
pub mod registry;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use registry::AsyncArenaRegistry;
