//! Common test utilities
#![allow(dead_code)]

use pickr::graph::OpRegistry;
use pickr::runtime::Runtime;
use pickr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};
use pickr::tensor::Tensor;
use std::sync::Arc;

/// Route `log` output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    init_logging();
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// A CPU client that never splits work across threads
pub fn create_sequential_client() -> (CpuClient, CpuDevice) {
    init_logging();
    let device = CpuDevice::new();
    let client = CpuClient::with_parallelism(device.clone(), ParallelismConfig::sequential())
        .expect("sequential client");
    (client, device)
}

/// A CPU client that splits every outer row into its own rayon task
pub fn create_parallel_client() -> (CpuClient, CpuDevice) {
    init_logging();
    let device = CpuDevice::new();
    let config = ParallelismConfig {
        min_len: 1,
        num_threads: Some(4),
    };
    let client = CpuClient::with_parallelism(device.clone(), config).expect("parallel client");
    (client, device)
}

/// Shared built-in registry for graph tests
pub fn builtin_registry() -> Arc<OpRegistry<CpuRuntime>> {
    Arc::new(OpRegistry::builtin())
}

/// Shorthand for an f32 CPU tensor
pub fn tensor_f32(data: &[f32], shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
    Tensor::<CpuRuntime>::from_slice(data, shape, device)
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
