//! Property-based tests for the selection operators
//!
//! Uses proptest over random shapes, axes and small-valued data (so ties are
//! frequent) and checks against straightforward reference loops.

mod common;

use common::create_cpu_client;
use pickr::ops::{PickMode, PickOps, PickParam, ReduceAxisParam, SearchOps, UtilityOps};
use pickr::runtime::cpu::CpuRuntime;
use pickr::tensor::Tensor;
use proptest::prelude::*;

/// Shape of rank 1..=3 with dims in 1..=5, an axis in it, and data for it
fn shape_axis_data() -> impl Strategy<Value = (Vec<usize>, usize, Vec<f32>)> {
    prop::collection::vec(1usize..=5, 1..=3).prop_flat_map(|shape| {
        let numel: usize = shape.iter().product();
        let rank = shape.len();
        (
            Just(shape),
            0..rank,
            prop::collection::vec((-3i32..=3).prop_map(|v| v as f32), numel),
        )
    })
}

fn split(shape: &[usize], axis: usize) -> (usize, usize, usize) {
    let outer = shape[..axis].iter().product();
    let inner = shape[axis + 1..].iter().product();
    (outer, shape[axis], inner)
}

proptest! {
    /// argmax returns the first position holding the maximum of every lane
    #[test]
    fn prop_argmax_is_first_maximum((shape, axis, data) in shape_axis_data()) {
        let (client, device) = create_cpu_client();
        let x = Tensor::<CpuRuntime>::from_slice(&data, &shape, &device);
        let out = client.argmax(&x, &ReduceAxisParam::axis(axis as isize)).unwrap();
        prop_assert_eq!(out.ndim(), shape.len() - 1);

        let got = out.to_vec::<f32>();
        let (outer, len, inner) = split(&shape, axis);
        for o in 0..outer {
            for i in 0..inner {
                let lane: Vec<f32> = (0..len).map(|k| data[(o * len + k) * inner + i]).collect();
                let pos = got[o * inner + i] as usize;
                prop_assert!(lane.iter().all(|&v| lane[pos] >= v));
                prop_assert!(lane[..pos].iter().all(|&v| v < lane[pos]));
            }
        }
    }

    /// argmin returns the first position holding the minimum of every lane
    #[test]
    fn prop_argmin_is_first_minimum((shape, axis, data) in shape_axis_data()) {
        let (client, device) = create_cpu_client();
        let x = Tensor::<CpuRuntime>::from_slice(&data, &shape, &device);
        let got = client
            .argmin(&x, &ReduceAxisParam::axis(axis as isize).keepdims(true))
            .unwrap()
            .to_vec::<f32>();

        let (outer, len, inner) = split(&shape, axis);
        for o in 0..outer {
            for i in 0..inner {
                let lane: Vec<f32> = (0..len).map(|k| data[(o * len + k) * inner + i]).collect();
                let pos = got[o * inner + i] as usize;
                prop_assert!(lane.iter().all(|&v| lane[pos] <= v));
                prop_assert!(lane[..pos].iter().all(|&v| v > lane[pos]));
            }
        }
    }

    /// Negative axes behave like their positive counterparts
    #[test]
    fn prop_negative_axis_matches((shape, axis, data) in shape_axis_data()) {
        let (client, device) = create_cpu_client();
        let x = Tensor::<CpuRuntime>::from_slice(&data, &shape, &device);
        let neg = axis as isize - shape.len() as isize;

        let a = client.argmax(&x, &ReduceAxisParam::axis(axis as isize)).unwrap();
        let b = client.argmax(&x, &ReduceAxisParam::axis(neg)).unwrap();
        prop_assert_eq!(a.shape(), b.shape());
        prop_assert_eq!(a.to_vec::<f32>(), b.to_vec::<f32>());
    }

    /// pick reads the addressed element, and backward(ones) is its one-hot mask
    #[test]
    fn prop_pick_round_trip(
        (shape, axis, data) in shape_axis_data(),
        seed in prop::collection::vec(0usize..100, 125),
    ) {
        let (client, device) = create_cpu_client();
        let (outer, len, inner) = split(&shape, axis);
        let index_shape: Vec<usize> = shape
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != axis)
            .map(|(_, &s)| s)
            .collect();
        let picks: Vec<f32> = (0..outer * inner).map(|c| (seed[c] % len) as f32).collect();

        let x = Tensor::<CpuRuntime>::from_slice(&data, &shape, &device);
        let index = Tensor::<CpuRuntime>::from_slice(&picks, &index_shape, &device);
        let param = PickParam::axis(axis as isize).mode(PickMode::Raise);

        let out = client.pick(&x, &index, &param).unwrap();
        let got = out.to_vec::<f32>();
        let grad = client
            .pick_backward(&client.ones_like(&out).unwrap(), &index, &param, &shape)
            .unwrap()
            .to_vec::<f32>();

        let mut mask = vec![0.0f32; data.len()];
        for o in 0..outer {
            for i in 0..inner {
                let k = picks[o * inner + i] as usize;
                let src = (o * len + k) * inner + i;
                prop_assert_eq!(got[o * inner + i], data[src]);
                mask[src] = 1.0;
            }
        }
        prop_assert_eq!(grad, mask);
    }

    /// Clip and Wrap agree with their definitions on arbitrary index values
    #[test]
    fn prop_out_of_range_policies(len in 1usize..=6, raw in -20i32..20) {
        let (client, device) = create_cpu_client();
        let data: Vec<f32> = (0..len).map(|v| v as f32).collect();
        let x = Tensor::<CpuRuntime>::from_slice(&data, &[1, len], &device);
        let index = Tensor::<CpuRuntime>::from_slice(&[raw as f32], &[1], &device);

        let clip = client.pick(&x, &index, &PickParam::axis(1)).unwrap().to_vec::<f32>();
        prop_assert_eq!(clip[0] as i32, raw.clamp(0, len as i32 - 1));

        let wrap = client
            .pick(&x, &index, &PickParam::axis(1).mode(PickMode::Wrap))
            .unwrap()
            .to_vec::<f32>();
        prop_assert_eq!(wrap[0] as i32, raw.rem_euclid(len as i32));

        let raise = client.pick(&x, &index, &PickParam::axis(1).mode(PickMode::Raise));
        prop_assert_eq!(raise.is_ok(), (0..len as i32).contains(&raw));
    }
}
