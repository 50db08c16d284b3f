//! Helper functions for CPU selection operations
//!
//! Helpers take already-validated tensors and an [`AxisSplit`], dispatch on
//! dtype and drive the raw kernels, splitting work across outer rows.
//!
//! [`AxisSplit`]: crate::ops::AxisSplit

mod pick;
mod search;
mod utility;

pub use pick::{pick_backward_impl, pick_impl};
pub use search::search_axis_impl;
pub use utility::{add_impl, fill_impl};

use super::CpuClient;

/// Whether `outer` rows are worth splitting into more than one task
///
/// Always false without the "rayon" feature.
pub(crate) fn should_split(client: &CpuClient, outer: usize) -> bool {
    cfg!(feature = "rayon") && outer > client.rayon_min_len()
}

/// Run `f(o)` for every outer row `o < outer`
///
/// Rows write disjoint regions of their output, so with the "rayon" feature
/// they are distributed over the client's pool with `rayon_min_len` rows per
/// task at minimum.
pub(crate) fn for_each_outer<F>(
    #[cfg_attr(not(feature = "rayon"), allow(unused_variables))] client: &CpuClient,
    outer: usize,
    f: F,
) where
    F: Fn(usize) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        if outer > 1 {
            let min_len = client.rayon_min_len();
            client.install_parallelism(|| {
                (0..outer).into_par_iter().with_min_len(min_len).for_each(&f);
            });
            return;
        }
    }

    (0..outer).for_each(f);
}
