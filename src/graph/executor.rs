//! Graph executor

use super::core::Graph;
use super::infer::GraphInfo;
use super::node::{NodeId, NodeKind};
use super::registry::OpRegistry;
use crate::error::{Error, Result};
use crate::ops::OpReq;
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::sync::Arc;

/// Tensors produced by one graph execution, indexed by node
#[derive(Debug, Clone)]
pub struct Values<R: Runtime> {
    tensors: Vec<Tensor<R>>,
}

impl<R: Runtime> Values<R> {
    /// Value of a node
    pub fn get(&self, id: NodeId) -> Result<&Tensor<R>> {
        self.tensors.get(id.0).ok_or(Error::UnknownNode(id.0))
    }

    /// Number of values (one per node)
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }
}

/// Runs graphs on one runtime client
///
/// Execution is synchronous and in arena order. Every operator node gets
/// exactly one freshly allocated output buffer, written with
/// [`OpReq::WriteTo`].
pub struct Executor<R: Runtime> {
    registry: Arc<OpRegistry<R>>,
    client: R::Client,
}

impl<R: Runtime> Executor<R> {
    /// Create an executor over a shared registry
    pub fn new(registry: Arc<OpRegistry<R>>, client: R::Client) -> Self {
        Self { registry, client }
    }

    /// The operator registry
    pub fn registry(&self) -> &OpRegistry<R> {
        &self.registry
    }

    /// The runtime client
    pub fn client(&self) -> &R::Client {
        &self.client
    }

    /// Infer and execute `graph` with `feeds` bound to its variables by name
    pub fn run(&self, graph: &Graph, feeds: &HashMap<String, Tensor<R>>) -> Result<Values<R>> {
        let info = graph.infer(&self.registry)?;
        self.run_inferred(graph, &info, feeds)
    }

    /// Execute `graph` using inference results computed earlier
    pub fn run_inferred(
        &self,
        graph: &Graph,
        info: &GraphInfo,
        feeds: &HashMap<String, Tensor<R>>,
    ) -> Result<Values<R>> {
        if info.len() != graph.len() {
            return Err(Error::Internal(format!(
                "graph has {} nodes but inference covers {}",
                graph.len(),
                info.len()
            )));
        }
        log::debug!("executing graph with {} nodes on {}", graph.len(), R::name());

        let device = self.client.device();
        let mut tensors: Vec<Tensor<R>> = Vec::with_capacity(graph.len());

        for (id, node) in graph.nodes() {
            let value = match node.kind() {
                NodeKind::Variable { name, shape, dtype } => {
                    let fed = feeds
                        .get(name)
                        .ok_or_else(|| Error::MissingInput { name: name.clone() })?;
                    if fed.shape() != shape.as_slice() {
                        return Err(Error::shape_mismatch(shape, fed.shape()));
                    }
                    if fed.dtype() != *dtype {
                        return Err(Error::DTypeMismatch {
                            lhs: *dtype,
                            rhs: fed.dtype(),
                        });
                    }
                    fed.clone()
                }
                NodeKind::Op { op, attrs, inputs } => {
                    let def = self.registry.get(op)?;
                    let out = Tensor::try_zeros(info.shape(id)?, info.dtype(id)?, device)?;
                    let args: Vec<&Tensor<R>> = inputs.iter().map(|i| &tensors[i.0]).collect();

                    log::trace!("execute: {id} = {op}{:?}", out.shape());
                    def.execute(&self.client, &args, attrs, &out, OpReq::WriteTo)?;
                    out
                }
            };
            tensors.push(value);
        }

        self.client.synchronize();
        Ok(Values { tensors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::ops::{OpAttrs, ReduceAxisParam};
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    fn executor() -> Executor<CpuRuntime> {
        let device = CpuDevice::new();
        Executor::new(
            Arc::new(OpRegistry::builtin()),
            CpuRuntime::default_client(&device),
        )
    }

    #[test]
    fn test_run_argmax() {
        let exec = executor();
        let mut graph = Graph::new();
        let x = graph.variable("x", &[2, 3], DType::F32);
        let y = graph
            .op(
                exec.registry(),
                "argmax",
                &[x],
                OpAttrs::Reduce(ReduceAxisParam::axis(1)),
            )
            .unwrap();

        let device = CpuDevice::new();
        let feeds = HashMap::from([(
            "x".to_string(),
            Tensor::<CpuRuntime>::from_slice(&[0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0], &[2, 3], &device),
        )]);
        let values = exec.run(&graph, &feeds).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get(y).unwrap().to_vec::<f32>(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_feed_validation() {
        let exec = executor();
        let device = CpuDevice::new();
        let mut graph = Graph::new();
        graph.variable("x", &[2], DType::F32);

        assert_eq!(
            exec.run(&graph, &HashMap::new()).unwrap_err(),
            Error::MissingInput {
                name: "x".to_string()
            }
        );

        let wrong_shape = HashMap::from([(
            "x".to_string(),
            Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &[3], &device),
        )]);
        assert!(matches!(
            exec.run(&graph, &wrong_shape),
            Err(Error::ShapeMismatch { .. })
        ));

        let wrong_dtype = HashMap::from([(
            "x".to_string(),
            Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device),
        )]);
        assert_eq!(
            exec.run(&graph, &wrong_dtype).unwrap_err(),
            Error::DTypeMismatch {
                lhs: DType::F32,
                rhs: DType::F64
            }
        );
    }
}
