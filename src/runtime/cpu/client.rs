//! CPU client and parallelism configuration

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::error::Result;
use crate::runtime::RuntimeClient;
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// Default minimum number of outer rows handed to one rayon task
pub const DEFAULT_RAYON_MIN_LEN: usize = 64;

/// Parallel execution settings for a [`CpuClient`]
///
/// `min_len` bounds how finely the outer loop of a kernel is split across
/// rayon tasks. `num_threads` of `None` uses the global rayon pool; `Some(n)`
/// builds a dedicated pool of `n` threads for this client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Minimum outer rows per task (clamped to at least 1)
    pub min_len: usize,
    /// Dedicated pool size, or `None` for the global pool
    pub num_threads: Option<usize>,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_RAYON_MIN_LEN,
            num_threads: None,
        }
    }
}

impl ParallelismConfig {
    /// Single-threaded execution
    pub fn sequential() -> Self {
        Self {
            min_len: usize::MAX,
            num_threads: Some(1),
        }
    }
}

/// CPU client for operation dispatch
#[derive(Clone)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client using the global rayon pool
    pub fn new(device: CpuDevice) -> Self {
        Self {
            device,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Create a CPU client with explicit parallelism settings
    ///
    /// Fails with `Error::Internal` if a dedicated thread pool cannot be built.
    pub fn with_parallelism(device: CpuDevice, config: ParallelismConfig) -> Result<Self> {
        let config = ParallelismConfig {
            min_len: config.min_len.max(1),
            ..config
        };

        #[cfg(feature = "rayon")]
        let pool = match config.num_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n.max(1))
                    .thread_name(|i| format!("pickr-cpu-{i}"))
                    .build()
                    .map_err(|e| {
                        crate::error::Error::Internal(format!("failed to build thread pool: {e}"))
                    })?;
                log::debug!("cpu client: dedicated rayon pool with {n} threads");
                Some(Arc::new(pool))
            }
            None => None,
        };

        Ok(Self {
            device,
            parallelism: config,
            #[cfg(feature = "rayon")]
            pool,
        })
    }

    /// Current parallelism settings
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }

    /// Minimum outer rows per rayon task
    #[inline]
    pub fn rayon_min_len(&self) -> usize {
        self.parallelism.min_len
    }

    /// Run `f` inside this client's thread pool
    ///
    /// Without a dedicated pool (or without the "rayon" feature) `f` simply
    /// runs on the calling thread, and any parallel iterators inside it use
    /// the global pool.
    pub fn install_parallelism<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        #[cfg(feature = "rayon")]
        if let Some(pool) = &self.pool {
            return pool.install(f);
        }
        f()
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }
}

impl std::fmt::Debug for CpuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuClient")
            .field("device", &self.device)
            .field("parallelism", &self.parallelism)
            .finish()
    }
}
