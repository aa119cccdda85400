//! SIMD backends and runtime dispatch for bulk lane conversion
//!
//! # Architecture
//!
//! - `context`: `ConversionContext`, the public entry point
//! - `backend`: `ConversionBackend` trait
//! - `scalar`: scalar reference implementation
//! - `dispatcher`: CPU feature detection and `BackendType` selection
//! - Platform-specific backends: `avx2`, `avx512`, `neon`

mod backend;
mod context;
mod dispatcher;
mod helpers;
mod scalar;

#[cfg(all(feature = "avx2", target_arch = "x86_64"))]
mod avx2;

#[cfg(all(feature = "avx512", target_arch = "x86_64"))]
mod avx512;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
mod neon;

pub use backend::ConversionBackend;
pub use context::ConversionContext;
pub use dispatcher::{BackendDispatcher, BackendType, CpuFeatures};
pub use scalar::ScalarBackend;

#[cfg(all(feature = "avx2", target_arch = "x86_64"))]
pub use avx2::Avx2Backend;

#[cfg(all(feature = "avx512", target_arch = "x86_64"))]
pub use avx512::Avx512Backend;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use neon::NeonBackend;
