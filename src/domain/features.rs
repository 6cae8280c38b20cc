/// Fixed-arity numeric input to the prediction model.
///
/// The arity and field order are dictated by the trained artifact; a vector
/// with the wrong arity is rejected at prediction time. A fresh vector is
/// built on every loop iteration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
