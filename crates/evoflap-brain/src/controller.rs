//! Feedforward jump controller.

use rand::Rng;

use crate::{
    matrix::{Mutation, WeightMatrix, WeightRange},
    sensor::{INPUT_NODES, SensorInput},
};

/// Number of values the network produces. Only the first is used.
pub const OUTPUT_NODES: usize = 1;

/// A two-layer sigmoid network mapping [`SensorInput`] to a jump score.
///
/// The weights are fixed for the controller's whole life, so [`decide`] is a
/// pure function of the input.
///
/// [`decide`]: Self::decide
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralController {
    hidden: WeightMatrix,
    output: WeightMatrix,
}

impl NeuralController {
    /// Creates a controller with freshly randomized weights.
    ///
    /// Every weight is drawn independently and uniformly from `range`.
    ///
    /// # Panics
    ///
    /// Panics if `hidden_nodes` is zero.
    pub fn founder<R>(hidden_nodes: usize, range: WeightRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(hidden_nodes > 0, "controller needs at least one hidden node");
        Self {
            hidden: WeightMatrix::random(hidden_nodes, INPUT_NODES, range, rng),
            output: WeightMatrix::random(OUTPUT_NODES, hidden_nodes, range, rng),
        }
    }

    /// Builds a controller from explicit layer weights.
    ///
    /// # Panics
    ///
    /// Panics if the shapes are not `HIDDEN × 3` and `1 × HIDDEN`.
    #[must_use]
    pub fn from_layers(hidden: WeightMatrix, output: WeightMatrix) -> Self {
        assert_eq!(hidden.cols(), INPUT_NODES, "hidden layer must take 3 inputs");
        assert_eq!(output.rows(), OUTPUT_NODES, "output layer must have 1 row");
        assert_eq!(
            output.cols(),
            hidden.rows(),
            "output layer must consume every hidden node"
        );
        Self { hidden, output }
    }

    /// Creates a child controller: a deep copy of `self` with `mutation` applied
    /// to both layers.
    #[must_use]
    pub fn offspring<R>(&self, mutation: Mutation, range: WeightRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            hidden: self.hidden.mutated(mutation, range, rng),
            output: self.output.mutated(mutation, range, rng),
        }
    }

    #[must_use]
    pub fn hidden_weights(&self) -> &WeightMatrix {
        &self.hidden
    }

    #[must_use]
    pub fn output_weights(&self) -> &WeightMatrix {
        &self.output
    }

    #[must_use]
    pub fn hidden_nodes(&self) -> usize {
        self.hidden.rows()
    }

    /// Runs the forward pass and returns the jump score in `[0, 1]`.
    #[must_use]
    pub fn decide(&self, input: &SensorInput) -> f64 {
        let hidden = sigmoid(self.hidden.mul_vec(input.as_slice()));
        let output = sigmoid(self.output.mul_vec(&hidden));
        output[0]
    }
}

fn sigmoid(mut layer: Vec<f64>) -> Vec<f64> {
    for x in &mut layer {
        *x = 1.0 / (1.0 + (-*x).exp());
    }
    layer
}
