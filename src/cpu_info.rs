//! Process-wide CPU feature record.
//!
//! Detected once on first use and immutable afterwards.

use std::sync::OnceLock;

/// SIMD capabilities relevant to the compositing kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    pub sse3: bool,
    pub sse41: bool,
}

impl CpuFeatures {
    /// Query the running CPU.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self {
                sse3: std::arch::is_x86_feature_detected!("sse3"),
                sse41: std::arch::is_x86_feature_detected!("sse4.1"),
            }
        }
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            Self::default()
        }
    }
}

static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Cached feature record for this process.
pub fn cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        log::debug!(
            "cpu features: sse3={} sse4.1={}",
            features.sse3,
            features.sse41
        );
        features
    })
}
