//! Operator registry
//!
//! Maps operator names (and aliases) to [`OpDef`] records: the inference,
//! compute and gradient hooks of one operator. A registry is built once,
//! typically with [`OpRegistry::builtin`], then shared read-only behind an
//! `Arc` by graphs, executors and the gradient composer.

use super::builtin;
use crate::autograd::GradientFn;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::{AttrKind, OpAttrs, OpReq, SelectionOps};
use crate::runtime::Runtime;
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::fmt;

/// Shape inference hook: input shapes and attributes to the output shape
pub type InferShapeFn = fn(&[&[usize]], &OpAttrs) -> Result<Vec<usize>>;

/// Type inference hook: input dtypes, the already-inferred input shapes and
/// attributes to the output dtype
pub type InferTypeFn = fn(&[DType], &[&[usize]], &OpAttrs) -> Result<DType>;

/// Compute hook: writes the result for `inputs` into `out`
pub type ComputeFn<R> =
    fn(&<R as Runtime>::Client, &[&Tensor<R>], &OpAttrs, &Tensor<R>, OpReq) -> Result<()>;

/// Definition of one operator
pub struct OpDef<R: Runtime> {
    /// Canonical name
    pub name: &'static str,
    /// Alternative names resolving to this definition
    pub aliases: &'static [&'static str],
    /// Names of the inputs, in order; their count is the operator's arity
    pub input_names: &'static [&'static str],
    /// Attribute record the operator expects
    pub attr_kind: AttrKind,
    /// Whether this operator only appears in backward graphs
    pub is_backward: bool,
    /// Shape inference
    pub infer_shape: InferShapeFn,
    /// Type inference
    pub infer_type: InferTypeFn,
    /// Forward computation on the runtime's client
    pub compute: ComputeFn<R>,
    /// Gradient rule; `None` marks the operator as not differentiable
    pub gradient: Option<GradientFn<R>>,
}

impl<R: Runtime> OpDef<R> {
    /// Number of inputs
    pub fn num_inputs(&self) -> usize {
        self.input_names.len()
    }

    /// Fail with `ArityMismatch` unless `got` inputs were supplied
    pub fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.num_inputs() {
            return Err(Error::arity(self.name, self.num_inputs(), got));
        }
        Ok(())
    }

    /// Fail with `InvalidArgument` unless `attrs` has the expected kind
    pub fn check_attrs(&self, attrs: &OpAttrs) -> Result<()> {
        if attrs.kind() != self.attr_kind {
            return Err(Error::InvalidArgument {
                arg: "attrs",
                reason: format!(
                    "operator '{}' expects {:?} attributes, got {:?}",
                    self.name,
                    self.attr_kind,
                    attrs.kind()
                ),
            });
        }
        Ok(())
    }

    /// Run shape inference after checking arity
    pub fn output_shape(&self, inputs: &[&[usize]], attrs: &OpAttrs) -> Result<Vec<usize>> {
        self.check_arity(inputs.len())?;
        (self.infer_shape)(inputs, attrs)
    }

    /// Run type inference after checking arity
    ///
    /// `shapes` are the input shapes, already validated by shape inference.
    pub fn output_type(
        &self,
        inputs: &[DType],
        shapes: &[&[usize]],
        attrs: &OpAttrs,
    ) -> Result<DType> {
        self.check_arity(inputs.len())?;
        (self.infer_type)(inputs, shapes, attrs)
    }

    /// Run the compute hook after checking arity
    pub fn execute(
        &self,
        client: &R::Client,
        inputs: &[&Tensor<R>],
        attrs: &OpAttrs,
        out: &Tensor<R>,
        req: OpReq,
    ) -> Result<()> {
        self.check_arity(inputs.len())?;
        (self.compute)(client, inputs, attrs, out, req)
    }
}

impl<R: Runtime> Clone for OpDef<R> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<R: Runtime> fmt::Debug for OpDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpDef")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("input_names", &self.input_names)
            .field("attr_kind", &self.attr_kind)
            .field("is_backward", &self.is_backward)
            .field("differentiable", &self.gradient.is_some())
            .finish()
    }
}

/// Name-to-definition table for one runtime
pub struct OpRegistry<R: Runtime> {
    defs: Vec<OpDef<R>>,
    names: HashMap<&'static str, usize>,
}

impl<R: Runtime> OpRegistry<R> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Registry holding every built-in selection operator
    ///
    /// `argmax`, `argmin`, `argmax_channel`, `pick` (alias `batch_take`),
    /// `_backward_pick`, `zeros_like`, `ones_like` and `_grad_add`.
    pub fn builtin() -> Self
    where
        R::Client: SelectionOps<R>,
    {
        let mut registry = Self::new();
        for def in builtin::definitions::<R>() {
            registry
                .register(def)
                .expect("built-in operator names and aliases are distinct");
        }
        log::debug!(
            "built operator registry for runtime '{}' with {} operators",
            R::name(),
            registry.len()
        );
        registry
    }

    /// Add a definition
    ///
    /// Fails with `InvalidArgument` if its name or one of its aliases is
    /// already taken.
    pub fn register(&mut self, def: OpDef<R>) -> Result<()> {
        let taken = std::iter::once(&def.name)
            .chain(def.aliases)
            .find(|name| self.names.contains_key(*name));
        if let Some(name) = taken {
            return Err(Error::InvalidArgument {
                arg: "name",
                reason: format!("operator '{name}' is already registered"),
            });
        }

        let slot = self.defs.len();
        self.names.insert(def.name, slot);
        for alias in def.aliases {
            self.names.insert(*alias, slot);
        }
        log::trace!("registered operator '{}'", def.name);
        self.defs.push(def);
        Ok(())
    }

    /// Look up a definition by name or alias
    pub fn get(&self, name: &str) -> Result<&OpDef<R>> {
        self.names
            .get(name)
            .map(|&slot| &self.defs[slot])
            .ok_or_else(|| Error::UnknownOperator {
                name: name.to_string(),
            })
    }

    /// Canonical name for `name` (identity for canonical names)
    pub fn canonical(&self, name: &str) -> Result<&'static str> {
        self.get(name).map(|def| def.name)
    }

    /// Whether `name` resolves to a definition
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Iterate over the definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &OpDef<R>> {
        self.defs.iter()
    }

    /// Number of definitions (aliases not counted)
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<R: Runtime> Default for OpRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> fmt::Debug for OpRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.defs.iter().map(|d| d.name))
            .finish()
    }
}
