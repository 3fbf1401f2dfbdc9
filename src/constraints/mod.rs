//! The constraint-posting surface of a [`Space`].
//!
//! Relational constraints (`eq`, `lt`, …) return the space again for
//! chaining. Composite constraints (`plus`, `sum`, `wsum`, …) produce a
//! result variable: the `*_into` form writes into a caller-named variable,
//! the plain form allocates a temporary and returns its name, which enables a
//! functional composition style. Referencing a name that has not been
//! declared declares it over the full band.

use crate::basic_types::Domain;
use crate::basic_types::ModelError;
use crate::basic_types::VarName;
use crate::emerald_assert_eq_simple;
use crate::engine::Space;
use crate::propagators::CmpOp;
use crate::propagators::EqualityPropagator;
use crate::propagators::LessThanPropagator;
use crate::propagators::NotEqualPropagator;
use crate::propagators::ReifiedPropagator;
use crate::propagators::RingOperation;
use crate::propagators::RingPropagator;
use crate::propagators::ScaleDownPropagator;
use crate::propagators::ScaleUpPropagator;

impl Space {
    /// Posts `x = y`.
    pub fn eq(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        let (x, y) = (x.into(), y.into());
        self.ensure_declared(&x);
        self.ensure_declared(&y);
        self.add_propagator(Box::new(EqualityPropagator::new(x, y)));
        self
    }

    /// Posts `x != y`.
    pub fn neq(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        let (x, y) = (x.into(), y.into());
        self.ensure_declared(&x);
        self.ensure_declared(&y);
        self.add_propagator(Box::new(NotEqualPropagator::new(x, y)));
        self
    }

    /// Posts `x < y`.
    pub fn lt(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        self.order(x.into(), y.into(), true)
    }

    /// Posts `x <= y`.
    pub fn lte(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        self.order(x.into(), y.into(), false)
    }

    /// Posts `x > y`.
    pub fn gt(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        self.order(y.into(), x.into(), true)
    }

    /// Posts `x >= y`.
    pub fn gte(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> &mut Space {
        self.order(y.into(), x.into(), false)
    }

    fn order(&mut self, smaller: VarName, larger: VarName, strict: bool) -> &mut Space {
        self.ensure_declared(&smaller);
        self.ensure_declared(&larger);
        self.add_propagator(Box::new(LessThanPropagator::new(smaller, larger, strict)));
        self
    }

    /// Posts pairwise `!=` over all variables.
    pub fn distinct(&mut self, variables: &[VarName]) -> &mut Space {
        for (i, x) in variables.iter().enumerate() {
            for y in &variables[i + 1..] {
                let _ = self.neq(x, y);
            }
        }
        self
    }

    /// Posts `x + y = out` for a fresh temporary `out` and returns it.
    pub fn plus(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> VarName {
        self.plus_impl(x.into(), y.into(), None)
    }

    /// Posts `x + y = out`.
    pub fn plus_into(
        &mut self,
        x: impl Into<VarName>,
        y: impl Into<VarName>,
        out: impl Into<VarName>,
    ) -> VarName {
        self.plus_impl(x.into(), y.into(), Some(out.into()))
    }

    /// Posts `x * y = out` for a fresh temporary `out` and returns it.
    pub fn times(&mut self, x: impl Into<VarName>, y: impl Into<VarName>) -> VarName {
        self.times_impl(x.into(), y.into(), None)
    }

    /// Posts `x * y = out`.
    pub fn times_into(
        &mut self,
        x: impl Into<VarName>,
        y: impl Into<VarName>,
        out: impl Into<VarName>,
    ) -> VarName {
        self.times_impl(x.into(), y.into(), Some(out.into()))
    }

    fn plus_impl(&mut self, x: VarName, y: VarName, out: Option<VarName>) -> VarName {
        self.ring(x, y, out, RingOperation::Add, RingOperation::Subtract)
    }

    fn times_impl(&mut self, x: VarName, y: VarName, out: Option<VarName>) -> VarName {
        self.ring(x, y, out, RingOperation::Multiply, RingOperation::DivideBy)
    }

    /// Posts the three directions of `x ∘ y = out`: the target from the
    /// operands via `forward` and each operand from the target via `inverse`.
    fn ring(
        &mut self,
        x: VarName,
        y: VarName,
        out: Option<VarName>,
        forward: RingOperation,
        inverse: RingOperation,
    ) -> VarName {
        self.ensure_declared(&x);
        self.ensure_declared(&y);
        let out = out.unwrap_or_else(|| self.temp());
        self.ensure_declared(&out);
        self.add_propagator(Box::new(RingPropagator::new(
            out.clone(),
            x.clone(),
            y.clone(),
            forward,
        )));
        self.add_propagator(Box::new(RingPropagator::new(
            x.clone(),
            out.clone(),
            y.clone(),
            inverse,
        )));
        self.add_propagator(Box::new(RingPropagator::new(y, out.clone(), x, inverse)));
        out
    }

    /// Posts `factor * value = out` for a fresh temporary `out` and returns
    /// it.
    pub fn scale(&mut self, factor: i64, value: impl Into<VarName>) -> Result<VarName, ModelError> {
        self.scale_impl(factor, value.into(), None)
    }

    /// Posts `factor * value = out`.
    pub fn scale_into(
        &mut self,
        factor: i64,
        value: impl Into<VarName>,
        out: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.scale_impl(factor, value.into(), Some(out.into()))
    }

    fn scale_impl(
        &mut self,
        factor: i64,
        value: VarName,
        out: Option<VarName>,
    ) -> Result<VarName, ModelError> {
        if factor < 0 {
            return Err(ModelError::NegativeScaleFactor(factor));
        }
        self.ensure_declared(&value);
        let out = out.unwrap_or_else(|| self.temp());
        self.ensure_declared(&out);
        match factor {
            0 => {
                let zero = self.konst(0)?;
                let _ = self.eq(zero, out.clone());
            }
            1 => {
                let _ = self.eq(value, out.clone());
            }
            factor => {
                let factor = factor as u64;
                self.add_propagator(Box::new(ScaleUpPropagator::new(
                    out.clone(),
                    value.clone(),
                    factor,
                )));
                self.add_propagator(Box::new(ScaleDownPropagator::new(value, out.clone(), factor)));
            }
        }
        Ok(out)
    }

    /// Posts `Σ variables = out` for a fresh temporary `out` and returns it.
    /// With a single variable the variable itself is returned.
    pub fn sum(&mut self, variables: &[VarName]) -> Result<VarName, ModelError> {
        self.fold(variables, None, RingKind::Sum)
    }

    /// Posts `Σ variables = out`.
    pub fn sum_into(
        &mut self,
        variables: &[VarName],
        out: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.fold(variables, Some(out.into()), RingKind::Sum)
    }

    /// Posts `Π variables = out` for a fresh temporary `out` and returns it.
    pub fn product(&mut self, variables: &[VarName]) -> Result<VarName, ModelError> {
        self.fold(variables, None, RingKind::Product)
    }

    /// Posts `Π variables = out`.
    pub fn product_into(
        &mut self,
        variables: &[VarName],
        out: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.fold(variables, Some(out.into()), RingKind::Product)
    }

    /// Balanced binary decomposition: split the list at the midpoint, fold
    /// each half into a temporary, and combine the halves. Keeps the
    /// decomposition tree (and hence interval blow-up) logarithmic.
    fn fold(
        &mut self,
        variables: &[VarName],
        out: Option<VarName>,
        kind: RingKind,
    ) -> Result<VarName, ModelError> {
        if variables.is_empty() {
            return Err(ModelError::EmptyVariableList);
        }
        if variables.len() == 1 {
            let only = variables[0].clone();
            self.ensure_declared(&only);
            return Ok(match out {
                Some(out) => {
                    let _ = self.eq(only, out.clone());
                    out
                }
                None => only,
            });
        }
        let midpoint = variables.len() / 2;
        let left = self.fold(&variables[..midpoint], None, kind)?;
        let right = self.fold(&variables[midpoint..], None, kind)?;
        Ok(match kind {
            RingKind::Sum => self.plus_impl(left, right, out),
            RingKind::Product => self.times_impl(left, right, out),
        })
    }

    /// Posts `Σ factors[i] * variables[i] = out` for a fresh temporary `out`
    /// and returns it.
    pub fn wsum(&mut self, factors: &[i64], variables: &[VarName]) -> Result<VarName, ModelError> {
        self.wsum_impl(factors, variables, None)
    }

    /// Posts `Σ factors[i] * variables[i] = out`.
    pub fn wsum_into(
        &mut self,
        factors: &[i64],
        variables: &[VarName],
        out: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.wsum_impl(factors, variables, Some(out.into()))
    }

    fn wsum_impl(
        &mut self,
        factors: &[i64],
        variables: &[VarName],
        out: Option<VarName>,
    ) -> Result<VarName, ModelError> {
        emerald_assert_eq_simple!(
            factors.len(),
            variables.len(),
            "wsum requires one factor per variable"
        );
        let terms = factors
            .iter()
            .zip(variables)
            .map(|(&factor, variable)| self.scale_impl(factor, variable.clone(), None))
            .collect::<Result<Vec<_>, _>>()?;
        self.fold(&terms, out, RingKind::Sum)
    }

    /// Posts `k1 * v1 + k2 * v2 = out` for a fresh temporary `out` and
    /// returns it.
    pub fn times_plus(
        &mut self,
        k1: i64,
        v1: impl Into<VarName>,
        k2: i64,
        v2: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.times_plus_impl(k1, v1.into(), k2, v2.into(), None)
    }

    /// Posts `k1 * v1 + k2 * v2 = out`.
    pub fn times_plus_into(
        &mut self,
        k1: i64,
        v1: impl Into<VarName>,
        k2: i64,
        v2: impl Into<VarName>,
        out: impl Into<VarName>,
    ) -> Result<VarName, ModelError> {
        self.times_plus_impl(k1, v1.into(), k2, v2.into(), Some(out.into()))
    }

    fn times_plus_impl(
        &mut self,
        k1: i64,
        v1: VarName,
        k2: i64,
        v2: VarName,
        out: Option<VarName>,
    ) -> Result<VarName, ModelError> {
        let left = self.scale_impl(k1, v1, None)?;
        let right = self.scale_impl(k2, v2, None)?;
        Ok(self.plus_impl(left, right, out))
    }

    /// Reifies `x (op) y` into a fresh boolean temporary and returns it.
    pub fn reified(&mut self, op: CmpOp, x: impl Into<VarName>, y: impl Into<VarName>) -> VarName {
        self.reified_impl(op, x.into(), y.into(), None)
    }

    /// Reifies `x (op) y` into `b`, which is constrained to `{0, 1}`.
    pub fn reified_into(
        &mut self,
        op: CmpOp,
        x: impl Into<VarName>,
        y: impl Into<VarName>,
        b: impl Into<VarName>,
    ) -> VarName {
        self.reified_impl(op, x.into(), y.into(), Some(b.into()))
    }

    fn reified_impl(&mut self, op: CmpOp, x: VarName, y: VarName, b: Option<VarName>) -> VarName {
        self.ensure_declared(&x);
        self.ensure_declared(&y);
        let b = match b {
            Some(b) => {
                self.ensure_declared(&b);
                let _ = self.constrain(&b, &Domain::range(0, 1));
                b
            }
            None => self.temp_with(Domain::range(0, 1)),
        };
        self.add_propagator(Box::new(ReifiedPropagator::new(op, x, y, b.clone())));
        b
    }
}

/// Which combining operation [`Space::fold`] builds its decomposition tree
/// with.
#[derive(Clone, Copy, Debug)]
enum RingKind {
    Sum,
    Product,
}
