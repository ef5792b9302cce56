//! The built-in assembly-workshop plan: five products (a through e) with
//! contracted minimum production levels, competing for the weekly capacity of
//! five stations. Profit per unit is maximized.

use planrs_core::math::Scalar;
use planrs_core::model::{LinearExpr, Model, ModelResult, VarId};

const PRODUCTS: [(&str, Scalar); 5] = [
    ("a", 150.0),
    ("b", 100.0),
    ("c", 200.0),
    ("d", 400.0),
    ("e", 350.0),
];

const STATIONS: [(&str, [Scalar; 5], Scalar); 5] = [
    ("cabling", [0.5, 1.5, 1.5, 1.0, 0.5], 1500.0),
    ("painting", [1.0, 0.5, 1.0, 0.5, 1.5], 2850.0),
    ("drilling", [3.0, 1.0, 2.0, 3.0, 0.5], 2350.0),
    ("assembly", [2.0, 4.0, 1.0, 2.0, 1.5], 2600.0),
    ("testing", [0.5, 1.0, 0.5, 0.5, 2.0], 1200.0),
];

const PROFIT: [Scalar; 5] = [90.0, 120.0, 150.0, 110.0, 130.0];

pub fn workshop_model() -> ModelResult<Model> {
    let mut model = Model::new();
    let mut vars: Vec<VarId> = Vec::with_capacity(PRODUCTS.len());
    for (name, minimum) in PRODUCTS {
        // Minimum production levels are the variable lower bounds.
        vars.push(model.add_variable(name, minimum)?);
    }
    for (name, hours, capacity) in STATIONS {
        model.add_constraint(name, weighted(&vars, &hours), capacity);
    }
    model.maximize(weighted(&vars, &PROFIT));
    Ok(model)
}

fn weighted(vars: &[VarId], coefficients: &[Scalar; 5]) -> LinearExpr {
    vars.iter()
        .zip(coefficients)
        .fold(LinearExpr::new(), |expr, (var, coefficient)| {
            expr.term(*var, *coefficient)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use planrs_core::model::Sense;

    #[test]
    fn workshop_shape() {
        let model = workshop_model().unwrap();
        assert_eq!(model.num_variables(), 5);
        assert_eq!(model.num_constraints(), 5);
        assert_eq!(model.objective().unwrap().sense, Sense::Maximize);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn lower_bounds_leave_capacity_slack() {
        // The minimum production levels alone must be feasible.
        let model = workshop_model().unwrap();
        let lowers = model.lower_bounds();
        for constraint in model.constraints() {
            assert!(constraint.expr.value_at(&lowers) <= constraint.rhs);
        }
    }
}
