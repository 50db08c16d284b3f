//! CPU implementation of axis search operations.

use crate::error::Result;
use crate::ops::{
    OpReq, ReduceAxisParam, SearchKind, SearchOps, reduce_axis_shape, reduce_axis_split,
    search_type, traits::check_output,
};
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::search_axis_impl};
use crate::tensor::Tensor;

/// SearchOps implementation for CPU runtime.
impl SearchOps<CpuRuntime> for CpuClient {
    fn search_axis_into(
        &self,
        kind: SearchKind,
        a: &Tensor<CpuRuntime>,
        param: &ReduceAxisParam,
        out: &Tensor<CpuRuntime>,
        req: OpReq,
    ) -> Result<()> {
        let op = kind.op_name();
        let out_shape = reduce_axis_shape(a.shape(), param)?;
        let dtype = search_type(a.dtype(), a.shape(), param, op)?;
        check_output(out, &out_shape, dtype)?;

        let split = reduce_axis_split(a.shape(), param)?;
        search_axis_impl(self, kind, a, split, out, req, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::Error;
    use crate::runtime::cpu::CpuDevice;

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        (CpuClient::new(device.clone()), device)
    }

    #[test]
    fn test_argmax_flatten() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[3.0f64, 9.0, 9.0, -1.0], &[2, 2], &device);

        let idx = client.argmax(&x, &ReduceAxisParam::flatten()).unwrap();
        assert!(idx.is_scalar());
        assert_eq!(idx.to_vec::<f64>(), vec![1.0]);

        let idx = client
            .argmin(&x, &ReduceAxisParam::flatten().keepdims(true))
            .unwrap();
        assert_eq!(idx.shape(), &[1, 1]);
        assert_eq!(idx.to_vec::<f64>(), vec![3.0]);
    }

    #[test]
    fn test_search_into_validates_output() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);

        let wrong_shape = Tensor::<CpuRuntime>::zeros(&[3], DType::F32, &device);
        assert!(matches!(
            client.argmax_into(&x, &ReduceAxisParam::axis(0), &wrong_shape, OpReq::WriteTo),
            Err(Error::ShapeMismatch { .. })
        ));

        let wrong_dtype = Tensor::<CpuRuntime>::zeros(&[2], DType::I64, &device);
        assert!(matches!(
            client.argmax_into(&x, &ReduceAxisParam::axis(0), &wrong_dtype, OpReq::WriteTo),
            Err(Error::DTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_search_add_to() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::from_slice(&[1i32, 5, 2, 0], &[2, 2], &device);
        let out = Tensor::<CpuRuntime>::from_slice(&[10i32, 20], &[2], &device);

        client
            .argmax_into(&x, &ReduceAxisParam::axis(1), &out, OpReq::AddTo)
            .unwrap();
        assert_eq!(out.to_vec::<i32>(), vec![11, 20]);

        client
            .argmax_into(&x, &ReduceAxisParam::axis(1), &out, OpReq::Null)
            .unwrap();
        assert_eq!(out.to_vec::<i32>(), vec![11, 20]);
    }

    #[test]
    fn test_search_rejects_bool() {
        let (client, device) = setup();
        let x = Tensor::<CpuRuntime>::zeros(&[4], DType::Bool, &device);
        assert_eq!(
            client.argmax(&x, &ReduceAxisParam::axis(0)).unwrap_err(),
            Error::UnsupportedDType {
                dtype: DType::Bool,
                op: "argmax"
            }
        );
    }
}
