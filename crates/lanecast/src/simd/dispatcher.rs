//! Runtime Backend Dispatcher
//!
//! This module provides CPU feature detection and SIMD backend selection.
//! On x86_64 with `runtime-dispatch`, it detects AVX2/AVX-512 support at
//! runtime. Without it, detection reports the compile-time `target_feature`s.
//! On aarch64, NEON is assumed always present.

use core::fmt;

use super::backend::ConversionBackend;
use crate::shape::VectorShape;

/// CPU Feature Detection Results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// AVX2 support available (x86_64)
    pub has_avx2: bool,

    /// AVX-512 Foundation (x86_64)
    pub has_avx512_f: bool,

    /// AVX-512 Byte & Word operations (x86_64)
    pub has_avx512_bw: bool,

    /// AVX-512 Doubleword & Quadword operations (x86_64)
    pub has_avx512_dq: bool,

    /// AVX-512 Vector Length extensions (x86_64)
    pub has_avx512_vl: bool,
}

impl CpuFeatures {
    /// Detect CPU features
    ///
    /// # Platform Behavior
    /// - **x86_64 with `runtime-dispatch`**: CPUID via the `cpufeatures` crate
    /// - **otherwise**: the compile-time target features
    ///
    /// # Performance
    /// - First call: ~100-200 CPU cycles (CPUID instruction)
    /// - Subsequent calls: cached by cpufeatures, a single atomic load
    pub fn detect() -> Self {
        #[cfg(all(feature = "runtime-dispatch", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_avx512f, "avx512f");
            cpufeatures::new!(cpuid_avx512bw, "avx512bw");
            cpufeatures::new!(cpuid_avx512dq, "avx512dq");
            cpufeatures::new!(cpuid_avx512vl, "avx512vl");

            Self {
                has_avx2: cpuid_avx2::get(),
                has_avx512_f: cpuid_avx512f::get(),
                has_avx512_bw: cpuid_avx512bw::get(),
                has_avx512_dq: cpuid_avx512dq::get(),
                has_avx512_vl: cpuid_avx512vl::get(),
            }
        }

        #[cfg(not(all(feature = "runtime-dispatch", target_arch = "x86_64")))]
        {
            Self::compile_time()
        }
    }

    /// Features guaranteed by the compilation target
    pub const fn compile_time() -> Self {
        Self {
            has_avx2: cfg!(target_feature = "avx2"),
            has_avx512_f: cfg!(target_feature = "avx512f"),
            has_avx512_bw: cfg!(target_feature = "avx512bw"),
            has_avx512_dq: cfg!(target_feature = "avx512dq"),
            has_avx512_vl: cfg!(target_feature = "avx512vl"),
        }
    }

    /// Check if full AVX-512 support is available
    ///
    /// Requires AVX-512F, BW, DQ and VL.
    pub fn has_avx512_full(&self) -> bool {
        self.has_avx512_f && self.has_avx512_bw && self.has_avx512_dq && self.has_avx512_vl
    }

    /// Widest vector register these features provide
    ///
    /// Independent of which backends are compiled or forced:
    /// - 512 bits with full AVX-512
    /// - 256 bits with AVX2
    /// - 128 bits on x86_64 (SSE2 baseline), aarch64 (NEON baseline) and other
    ///   targets compiled with SSE2, NEON or wasm `simd128`
    /// - 64 bits otherwise
    pub fn native_shape(&self) -> VectorShape {
        if self.has_avx512_full() {
            VectorShape::S512
        } else if self.has_avx2 {
            VectorShape::S256
        } else if cfg!(any(
            target_arch = "x86_64",
            target_arch = "aarch64",
            target_feature = "sse2",
            target_feature = "neon",
            target_feature = "simd128"
        )) {
            VectorShape::S128
        } else {
            VectorShape::S64
        }
    }
}

/// Backend Type Enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// Scalar fallback (no SIMD, always available)
    Scalar,

    /// AVX2 backend (x86_64, 256-bit SIMD)
    Avx2,

    /// AVX-512 backend (x86_64, 512-bit SIMD)
    Avx512,

    /// NEON backend (aarch64, 128-bit SIMD)
    Neon,
}

impl BackendType {
    /// Every backend type, in ascending register width
    pub const ALL: [BackendType; 4] = [
        BackendType::Scalar,
        BackendType::Neon,
        BackendType::Avx2,
        BackendType::Avx512,
    ];

    /// Select optimal backend based on CPU features
    ///
    /// # Selection Priority
    /// 1. AVX-512 (if `avx512` feature compiled AND CPU supports full AVX-512)
    /// 2. AVX2 (if `avx2` feature compiled AND CPU supports AVX2)
    /// 3. NEON (if `neon` feature compiled on aarch64)
    /// 4. Scalar (fallback, always available)
    ///
    /// # Forced Backend Selection (CI testing)
    /// When a `force-*` feature is enabled, CPU detection is ignored and the
    /// forced backend is returned. Use `current()` to get a backend that is
    /// actually usable on this machine.
    pub fn select(features: CpuFeatures) -> Self {
        if cfg!(feature = "force-scalar") {
            return BackendType::Scalar;
        }
        if cfg!(feature = "force-avx2") {
            return BackendType::Avx2;
        }
        if cfg!(feature = "force-avx512") {
            return BackendType::Avx512;
        }
        if cfg!(feature = "force-neon") {
            return BackendType::Neon;
        }

        [BackendType::Avx512, BackendType::Avx2, BackendType::Neon]
            .into_iter()
            .find(|backend| backend.is_supported(features))
            .unwrap_or(BackendType::Scalar)
    }

    /// Backend selected for this machine
    ///
    /// `select(CpuFeatures::detect())`, falling back to scalar when a forced
    /// backend is not compiled in or not supported by the CPU.
    pub fn current() -> Self {
        let features = CpuFeatures::detect();
        let selected = Self::select(features);
        if selected.is_supported(features) {
            selected
        } else {
            BackendType::Scalar
        }
    }

    /// True if this backend is compiled in and `features` allow running it
    pub fn is_supported(self, features: CpuFeatures) -> bool {
        match self {
            BackendType::Scalar => true,
            BackendType::Avx2 => {
                cfg!(all(feature = "avx2", target_arch = "x86_64")) && features.has_avx2
            }
            BackendType::Avx512 => {
                cfg!(all(feature = "avx512", target_arch = "x86_64")) && features.has_avx512_full()
            }
            BackendType::Neon => cfg!(all(feature = "neon", target_arch = "aarch64")),
        }
    }

    /// Backend name for logging/debugging
    ///
    /// # Returns
    /// Static string: "scalar", "avx2", "avx512", or "neon"
    pub fn name(&self) -> &'static str {
        match self {
            BackendType::Scalar => "scalar",
            BackendType::Avx2 => "avx2",
            BackendType::Avx512 => "avx512",
            BackendType::Neon => "neon",
        }
    }

    /// Widest register the backend's kernels process
    ///
    /// Describes the kernels only. The platform maximum is
    /// `VectorShape::max()`, which `force-*` features do not change.
    pub fn max_shape(&self) -> VectorShape {
        match self {
            BackendType::Scalar => VectorShape::S64,
            BackendType::Neon => VectorShape::S128,
            BackendType::Avx2 => VectorShape::S256,
            BackendType::Avx512 => VectorShape::S512,
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Type aliases for function pointers to reduce complexity
type I8ToI32Fn = fn(&[i8], &mut [i32]);
type I16ToI32Fn = fn(&[i16], &mut [i32]);
type I32ToI64Fn = fn(&[i32], &mut [i64]);
type I32ToF32Fn = fn(&[i32], &mut [f32]);
type F32ToF64Fn = fn(&[f32], &mut [f64]);
type F64ToF32Fn = fn(&[f64], &mut [f32]);

/// Runtime Backend Dispatcher
///
/// Function pointer table for the accelerated conversion kernels of the
/// selected backend. Initialized once, then each call is a single indirect
/// jump.
#[derive(Clone, Debug)]
pub struct BackendDispatcher {
    // ========================================================================
    // Integer Widening
    // ========================================================================
    i8_to_i32_fn: I8ToI32Fn,
    i16_to_i32_fn: I16ToI32Fn,
    i32_to_i64_fn: I32ToI64Fn,

    // ========================================================================
    // Integer / Floating
    // ========================================================================
    i32_to_f32_fn: I32ToF32Fn,

    // ========================================================================
    // Floating Widening / Narrowing
    // ========================================================================
    f32_to_f64_fn: F32ToF64Fn,
    f64_to_f32_fn: F64ToF32Fn,

    backend_type: BackendType,
}

impl BackendDispatcher {
    /// Initialize dispatcher with optimal backend
    ///
    /// # Platform Behavior
    /// - **x86_64**: selects AVX-512 → AVX2 → Scalar
    /// - **aarch64**: selects NEON (or scalar if NEON is not compiled)
    ///
    /// # Performance
    /// - First call: ~100-200 CPU cycles (CPUID + function pointer setup)
    /// - Call once and reuse; not meant for the conversion loop
    pub fn init() -> Self {
        let selected = BackendType::select(CpuFeatures::detect());
        let backend_type = BackendType::current();
        if backend_type != selected {
            log::warn!(
                "{} backend unavailable on this machine, using {}",
                selected,
                backend_type
            );
        }

        let dispatcher = Self::for_backend(backend_type).unwrap_or_else(Self::for_scalar);
        log::debug!(
            "SIMD conversion backend: {} (kernel width {}, platform max {})",
            dispatcher.backend_name(),
            dispatcher.max_shape(),
            VectorShape::max()
        );
        dispatcher
    }

    /// Dispatcher for a specific backend, if it can run here
    pub fn for_backend(backend: BackendType) -> Option<Self> {
        if !backend.is_supported(CpuFeatures::detect()) {
            return None;
        }

        match backend {
            BackendType::Scalar => Some(Self::for_scalar()),

            #[cfg(all(feature = "avx2", target_arch = "x86_64"))]
            BackendType::Avx2 => Some(Self::from_backend::<super::avx2::Avx2Backend>(backend)),

            #[cfg(all(feature = "avx512", target_arch = "x86_64"))]
            BackendType::Avx512 => {
                Some(Self::from_backend::<super::avx512::Avx512Backend>(backend))
            }

            #[cfg(all(feature = "neon", target_arch = "aarch64"))]
            BackendType::Neon => Some(Self::from_backend::<super::neon::NeonBackend>(backend)),

            // Backend not compiled
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Create dispatcher for scalar backend
    pub fn for_scalar() -> Self {
        Self::from_backend::<super::scalar::ScalarBackend>(BackendType::Scalar)
    }

    fn from_backend<B: ConversionBackend>(backend_type: BackendType) -> Self {
        Self {
            i8_to_i32_fn: B::i8_to_i32,
            i16_to_i32_fn: B::i16_to_i32,
            i32_to_i64_fn: B::i32_to_i64,
            i32_to_f32_fn: B::i32_to_f32,
            f32_to_f64_fn: B::f32_to_f64,
            f64_to_f32_fn: B::f64_to_f32,
            backend_type,
        }
    }

    // ========================================================================
    // Integer Widening
    // ========================================================================

    /// Sign-extend bytes to ints: output[i] = input[i] as i32
    #[inline]
    pub fn i8_to_i32(&self, input: &[i8], output: &mut [i32]) {
        (self.i8_to_i32_fn)(input, output)
    }

    /// Sign-extend shorts to ints: output[i] = input[i] as i32
    #[inline]
    pub fn i16_to_i32(&self, input: &[i16], output: &mut [i32]) {
        (self.i16_to_i32_fn)(input, output)
    }

    /// Sign-extend ints to longs: output[i] = input[i] as i64
    #[inline]
    pub fn i32_to_i64(&self, input: &[i32], output: &mut [i64]) {
        (self.i32_to_i64_fn)(input, output)
    }

    // ========================================================================
    // Integer / Floating
    // ========================================================================

    /// Round ints to floats: output[i] = input[i] as f32
    #[inline]
    pub fn i32_to_f32(&self, input: &[i32], output: &mut [f32]) {
        (self.i32_to_f32_fn)(input, output)
    }

    // ========================================================================
    // Floating Widening / Narrowing
    // ========================================================================

    /// Widen floats: output[i] = input[i] as f64
    #[inline]
    pub fn f32_to_f64(&self, input: &[f32], output: &mut [f64]) {
        (self.f32_to_f64_fn)(input, output)
    }

    /// Narrow doubles: output[i] = input[i] as f32
    #[inline]
    pub fn f64_to_f32(&self, input: &[f64], output: &mut [f32]) {
        (self.f64_to_f32_fn)(input, output)
    }

    /// Get backend name for logging/debugging
    pub fn backend_name(&self) -> &'static str {
        self.backend_type.name()
    }

    /// Query selected backend type
    pub fn backend_type(&self) -> BackendType {
        self.backend_type
    }

    /// Widest register of the selected backend's kernels
    pub fn max_shape(&self) -> VectorShape {
        self.backend_type.max_shape()
    }
}
