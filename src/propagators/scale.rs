use crate::basic_types::Domain;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::basic_types::SUP;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// The upward half of `product = factor * value`: maps every interval of
/// `value` through the factor and narrows `product` with the image.
///
/// The posting layer handles the degenerate factors; propagators are only
/// built for `factor >= 2`.
#[derive(Clone, Debug)]
pub(crate) struct ScaleUpPropagator {
    /// `[product, value]`.
    variables: [VarName; 2],
    factor: u64,
    last_step: Option<u64>,
}

impl ScaleUpPropagator {
    pub(crate) fn new(product: VarName, value: VarName, factor: u64) -> ScaleUpPropagator {
        ScaleUpPropagator {
            variables: [product, value],
            factor,
            last_step: None,
        }
    }
}

impl Propagator for ScaleUpPropagator {
    fn name(&self) -> &str {
        "scale*"
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn dependencies(&self) -> &[VarName] {
        &self.variables[1..]
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(self.dependencies());
        if self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let image = Domain::from_raw(
            store
                .domain(&self.variables[1])
                .intervals()
                .iter()
                .map(|interval| {
                    Interval::new(
                        interval.lo.saturating_mul(self.factor).min(SUP),
                        interval.hi.saturating_mul(self.factor).min(SUP),
                    )
                })
                .collect(),
        );
        let delta = store.constrain(&self.variables[0], &image)?;
        self.last_step = Some(fingerprint);
        Ok(delta)
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(ScaleUpPropagator::new(
            self.variables[0].clone(),
            self.variables[1].clone(),
            self.factor,
        ))
    }
}

/// The downward half of `product = factor * value`: divides every interval of
/// `product` by the factor and narrows `value` with the image.
#[derive(Clone, Debug)]
pub(crate) struct ScaleDownPropagator {
    /// `[value, product]`.
    variables: [VarName; 2],
    factor: u64,
    last_step: Option<u64>,
}

impl ScaleDownPropagator {
    pub(crate) fn new(value: VarName, product: VarName, factor: u64) -> ScaleDownPropagator {
        ScaleDownPropagator {
            variables: [value, product],
            factor,
            last_step: None,
        }
    }
}

impl Propagator for ScaleDownPropagator {
    fn name(&self) -> &str {
        "scale/"
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn dependencies(&self) -> &[VarName] {
        &self.variables[1..]
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(self.dependencies());
        if self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let image = Domain::from_raw(
            store
                .domain(&self.variables[1])
                .intervals()
                .iter()
                .map(|interval| Interval::new(interval.lo / self.factor, interval.hi / self.factor))
                .collect(),
        );
        let delta = store.constrain(&self.variables[0], &image)?;
        self.last_step = Some(fingerprint);
        Ok(delta)
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(ScaleDownPropagator::new(
            self.variables[0].clone(),
            self.variables[1].clone(),
            self.factor,
        ))
    }
}
