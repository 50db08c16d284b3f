//! CPU implementation of utility operations.

use crate::error::Result;
use crate::ops::{OpReq, UtilityOps, same_shape, same_type, traits::check_output};
use crate::runtime::cpu::{
    CpuClient, CpuRuntime,
    helpers::{add_impl, fill_impl},
};
use crate::tensor::Tensor;

/// UtilityOps implementation for CPU runtime.
impl UtilityOps<CpuRuntime> for CpuClient {
    fn fill_into(&self, out: &Tensor<CpuRuntime>, value: f64, req: OpReq) -> Result<()> {
        fill_impl(out, value, req)
    }

    fn add_into(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        out: &Tensor<CpuRuntime>,
        req: OpReq,
    ) -> Result<()> {
        let shape = same_shape(a.shape(), b.shape())?;
        let dtype = same_type(a.dtype(), b.dtype())?;
        check_output(out, &shape, dtype)?;
        add_impl(a, b, out, req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_ones_like_and_add() {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        let x = Tensor::<CpuRuntime>::from_slice(&[4i16, 5, 6], &[3], &device);

        let ones = client.ones_like(&x).unwrap();
        assert_eq!(ones.dtype(), DType::I16);
        assert_eq!(ones.to_vec::<i16>(), vec![1, 1, 1]);

        let sum = client.add(&x, &ones).unwrap();
        assert_eq!(sum.to_vec::<i16>(), vec![5, 6, 7]);

        let zeros = client.zeros_like(&x).unwrap();
        assert_eq!(zeros.to_vec::<i16>(), vec![0, 0, 0]);
    }

    #[test]
    fn test_ones_like_bool() {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        let mask = Tensor::<CpuRuntime>::zeros(&[2], DType::Bool, &device);
        let ones = client.ones_like(&mask).unwrap();
        assert_eq!(ones.storage().to_vec::<u8>().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_add_mismatch() {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        let a = Tensor::<CpuRuntime>::zeros(&[2], DType::F32, &device);
        let b = Tensor::<CpuRuntime>::zeros(&[3], DType::F32, &device);
        assert!(client.add(&a, &b).is_err());
        let c = Tensor::<CpuRuntime>::zeros(&[2], DType::F64, &device);
        assert!(client.add(&a, &c).is_err());
    }
}
