//! Strongly-typed parameter objects for the selection operators
//!
//! Parameters are resolved once when a graph node is built and are immutable
//! afterwards. They are passed explicitly to every inference and compute
//! entry point.

use crate::error::{Error, Result};

/// Parameters of the axis reducers (`argmax`, `argmin`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReduceAxisParam {
    /// Axis to reduce; `None` reduces over the flattened tensor
    pub axis: Option<isize>,
    /// Keep the reduced axis as a size-1 dimension
    pub keepdims: bool,
}

impl ReduceAxisParam {
    /// Reduce along `axis`, dropping it from the output
    pub fn axis(axis: isize) -> Self {
        Self {
            axis: Some(axis),
            keepdims: false,
        }
    }

    /// Reduce over every element of the flattened tensor
    pub fn flatten() -> Self {
        Self {
            axis: None,
            keepdims: false,
        }
    }

    /// Builder-style keepdims setter
    pub fn keepdims(mut self, keepdims: bool) -> Self {
        self.keepdims = keepdims;
        self
    }

    /// The fixed specialisation used by `argmax_channel`
    pub fn channel() -> Self {
        Self::axis(1)
    }
}

impl Default for ReduceAxisParam {
    fn default() -> Self {
        Self::flatten()
    }
}

/// What to do with index values outside `[0, d_axis)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickMode {
    /// Clamp into `[0, d_axis - 1]`
    #[default]
    Clip,
    /// Wrap around modulo `d_axis`; negative values count from the end
    Wrap,
    /// Fail the computation with `Error::IndexOutOfBounds`
    Raise,
}

impl PickMode {
    /// Map a raw index value to a position along an axis of length `len`
    ///
    /// `len` must be non-zero. Under `Raise` the caller has already rejected
    /// out-of-range values, so the value is clamped like `Clip`.
    #[inline]
    pub fn resolve(self, raw: i64, len: usize) -> usize {
        let len = len as i64;
        match self {
            PickMode::Wrap => raw.rem_euclid(len) as usize,
            PickMode::Clip | PickMode::Raise => raw.clamp(0, len - 1) as usize,
        }
    }
}

/// Parameters of `pick` and its backward scatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickParam {
    /// Axis to select along; `None` selects along the last axis
    pub axis: Option<isize>,
    /// Keep the selected axis as a size-1 dimension
    pub keepdims: bool,
    /// Out-of-range index policy
    pub mode: PickMode,
}

impl PickParam {
    /// Pick along `axis` with clipping and no kept dimension
    pub fn axis(axis: isize) -> Self {
        Self {
            axis: Some(axis),
            ..Self::default()
        }
    }

    /// Builder-style keepdims setter
    pub fn keepdims(mut self, keepdims: bool) -> Self {
        self.keepdims = keepdims;
        self
    }

    /// Builder-style mode setter
    pub fn mode(mut self, mode: PickMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for PickParam {
    fn default() -> Self {
        Self {
            axis: None,
            keepdims: false,
            mode: PickMode::Clip,
        }
    }
}

/// How a compute entry point writes into its output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpReq {
    /// Leave the output untouched
    Null,
    /// Overwrite the output
    #[default]
    WriteTo,
    /// Accumulate into the existing output contents
    AddTo,
}

/// Which extremum an axis search looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// First position of the maximum
    Max,
    /// First position of the minimum
    Min,
}

impl SearchKind {
    /// Operator name used in errors
    pub fn op_name(self) -> &'static str {
        match self {
            SearchKind::Max => "argmax",
            SearchKind::Min => "argmin",
        }
    }

    /// Whether `candidate` strictly improves on `best`
    ///
    /// Only strict improvements move the result, so ties keep the earliest
    /// position and NaN never replaces an existing best.
    #[inline]
    pub fn improves<T: PartialOrd>(self, candidate: T, best: T) -> bool {
        match self {
            SearchKind::Max => candidate > best,
            SearchKind::Min => candidate < best,
        }
    }
}

/// Kind of attribute record an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// No attributes
    None,
    /// [`ReduceAxisParam`]
    Reduce,
    /// [`PickParam`]
    Pick,
    /// [`PickParam`] plus the forward data shape
    BackwardPick,
}

/// Attributes carried by a graph node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpAttrs {
    /// Operator takes no attributes
    #[default]
    None,
    /// Axis reducer parameters
    Reduce(ReduceAxisParam),
    /// Forward pick parameters
    Pick(PickParam),
    /// Backward pick: forward parameters and the shape of the forward data input
    BackwardPick {
        /// Parameters of the forward pick
        param: PickParam,
        /// Shape of the gradient being produced
        data_shape: Vec<usize>,
    },
}

impl OpAttrs {
    /// The kind of this attribute record
    pub fn kind(&self) -> AttrKind {
        match self {
            OpAttrs::None => AttrKind::None,
            OpAttrs::Reduce(_) => AttrKind::Reduce,
            OpAttrs::Pick(_) => AttrKind::Pick,
            OpAttrs::BackwardPick { .. } => AttrKind::BackwardPick,
        }
    }

    /// Reducer parameters, or `InvalidArgument`
    pub fn reduce(&self) -> Result<&ReduceAxisParam> {
        match self {
            OpAttrs::Reduce(p) => Ok(p),
            other => Err(wrong_kind(AttrKind::Reduce, other)),
        }
    }

    /// Pick parameters, or `InvalidArgument`
    pub fn pick(&self) -> Result<&PickParam> {
        match self {
            OpAttrs::Pick(p) => Ok(p),
            other => Err(wrong_kind(AttrKind::Pick, other)),
        }
    }

    /// Backward pick parameters and data shape, or `InvalidArgument`
    pub fn backward_pick(&self) -> Result<(&PickParam, &[usize])> {
        match self {
            OpAttrs::BackwardPick { param, data_shape } => Ok((param, data_shape)),
            other => Err(wrong_kind(AttrKind::BackwardPick, other)),
        }
    }
}

fn wrong_kind(expected: AttrKind, got: &OpAttrs) -> Error {
    Error::InvalidArgument {
        arg: "attrs",
        reason: format!("expected {:?} attributes, got {:?}", expected, got.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_mode_resolve() {
        assert_eq!(PickMode::Clip.resolve(-3, 4), 0);
        assert_eq!(PickMode::Clip.resolve(9, 4), 3);
        assert_eq!(PickMode::Clip.resolve(2, 4), 2);
        assert_eq!(PickMode::Wrap.resolve(5, 4), 1);
        assert_eq!(PickMode::Wrap.resolve(-1, 4), 3);
        assert_eq!(PickMode::Wrap.resolve(-8, 4), 0);
    }

    #[test]
    fn test_search_kind_is_strict() {
        assert!(SearchKind::Max.improves(2.0, 1.0));
        assert!(!SearchKind::Max.improves(1.0, 1.0));
        assert!(!SearchKind::Max.improves(f64::NAN, 1.0));
        assert!(SearchKind::Min.improves(-1, 0));
        assert!(!SearchKind::Min.improves(0, 0));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PickParam::default().mode, PickMode::Clip);
        assert_eq!(PickParam::default().axis, None);
        assert_eq!(ReduceAxisParam::default().axis, None);
        assert_eq!(OpReq::default(), OpReq::WriteTo);
        assert_eq!(ReduceAxisParam::channel(), ReduceAxisParam::axis(1));
    }

    #[test]
    fn test_attr_accessors() {
        let attrs = OpAttrs::Pick(PickParam::axis(0));
        assert_eq!(attrs.kind(), AttrKind::Pick);
        assert!(attrs.pick().is_ok());
        assert!(matches!(
            attrs.reduce(),
            Err(Error::InvalidArgument { arg: "attrs", .. })
        ));

        let attrs = OpAttrs::BackwardPick {
            param: PickParam::default(),
            data_shape: vec![2, 3],
        };
        let (_, shape) = attrs.backward_pick().unwrap();
        assert_eq!(shape, &[2, 3]);
    }
}
