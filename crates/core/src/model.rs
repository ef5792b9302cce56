use crate::math::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate variable name: {0}")]
    DuplicateVariable(String),
    #[error("variable index {index} out of range (model has {nvars} variables)")]
    UnknownVariable { index: usize, nvars: usize },
    #[error("invalid bounds for {name}: lower {lower} exceeds upper {upper}")]
    InvalidBounds {
        name: String,
        lower: Scalar,
        upper: Scalar,
    },
    #[error("non-finite value in {0}")]
    NonFinite(String),
    #[error("model has no objective")]
    MissingObjective,
    #[error("model has no variables")]
    Empty,
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Index of a variable in its model's insertion-ordered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub lower: Scalar,
    // serde_json writes non-finite floats as `null`; an absent/null upper
    // bound round-trips back to the unbounded default.
    #[serde(deserialize_with = "deserialize_upper")]
    pub upper: Scalar,
}

fn deserialize_upper<'de, D>(deserializer: D) -> Result<Scalar, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.unwrap_or(Scalar::INFINITY))
}

/// Sparse linear expression over model variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, Scalar)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, var: VarId, coefficient: Scalar) -> Self {
        self.terms.push((var, coefficient));
        self
    }

    pub fn value_at(&self, values: &[Scalar]) -> Scalar {
        self.terms
            .iter()
            .map(|(var, coefficient)| *coefficient * values[var.0])
            .sum()
    }

    fn validate(&self, context: &str, nvars: usize) -> ModelResult<()> {
        for (var, coefficient) in &self.terms {
            if var.0 >= nvars {
                return Err(ModelError::UnknownVariable {
                    index: var.0,
                    nvars,
                });
            }
            if !coefficient.is_finite() {
                return Err(ModelError::NonFinite(context.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub rhs: Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}

/// A linear program: bounded continuous variables, `expr <= rhs` constraints,
/// and a single linear objective.
///
/// Variables keep their insertion order; constraint and objective coefficients
/// refer back to them through [`VarId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    variables: IndexMap<String, Variable>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with the given lower bound and no upper bound.
    pub fn add_variable(&mut self, name: &str, lower: Scalar) -> ModelResult<VarId> {
        self.add_variable_bounded(name, lower, Scalar::INFINITY)
    }

    pub fn add_variable_bounded(
        &mut self,
        name: &str,
        lower: Scalar,
        upper: Scalar,
    ) -> ModelResult<VarId> {
        if self.variables.contains_key(name) {
            return Err(ModelError::DuplicateVariable(name.to_string()));
        }
        if lower > upper {
            return Err(ModelError::InvalidBounds {
                name: name.to_string(),
                lower,
                upper,
            });
        }
        if lower.is_nan() || upper.is_nan() {
            return Err(ModelError::NonFinite(format!("bounds of {name}")));
        }
        let id = VarId(self.variables.len());
        self.variables.insert(name.to_string(), Variable { lower, upper });
        Ok(id)
    }

    pub fn add_constraint(&mut self, name: &str, expr: LinearExpr, rhs: Scalar) {
        self.constraints.push(Constraint {
            name: name.to_string(),
            expr,
            rhs,
        });
    }

    pub fn maximize(&mut self, expr: LinearExpr) {
        self.objective = Some(Objective {
            sense: Sense::Maximize,
            expr,
        });
    }

    pub fn minimize(&mut self, expr: LinearExpr) {
        self.objective = Some(Objective {
            sense: Sense::Minimize,
            expr,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variables.get_index(var.0).map(|(name, _)| name.as_str())
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, var)| (name.as_str(), var))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn lower_bounds(&self) -> Vec<Scalar> {
        self.variables.values().map(|var| var.lower).collect()
    }

    pub fn upper_bounds(&self) -> Vec<Scalar> {
        self.variables.values().map(|var| var.upper).collect()
    }

    pub fn validate(&self) -> ModelResult<()> {
        let nvars = self.num_variables();
        if nvars == 0 {
            return Err(ModelError::Empty);
        }
        for (name, var) in &self.variables {
            if var.lower > var.upper {
                return Err(ModelError::InvalidBounds {
                    name: name.clone(),
                    lower: var.lower,
                    upper: var.upper,
                });
            }
            if var.lower.is_nan() || var.upper.is_nan() {
                return Err(ModelError::NonFinite(format!("bounds of {name}")));
            }
        }
        for constraint in &self.constraints {
            constraint
                .expr
                .validate(&format!("constraint {}", constraint.name), nvars)?;
            if !constraint.rhs.is_finite() {
                return Err(ModelError::NonFinite(format!(
                    "right-hand side of {}",
                    constraint.name
                )));
            }
        }
        let objective = self.objective.as_ref().ok_or(ModelError::MissingObjective)?;
        objective.expr.validate("objective", nvars)?;
        tracing::debug!(
            variables = nvars,
            constraints = self.constraints.len(),
            "model validated"
        );
        Ok(())
    }
}
