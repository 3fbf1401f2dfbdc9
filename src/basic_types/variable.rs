use crate::basic_types::domain::Domain;
use crate::basic_types::propagation_status::EmptyDomain;
use crate::emerald_assert_moderate;

/// A finite-domain variable: its current [`Domain`] plus a revision counter.
///
/// The revision increments exactly when the domain is replaced by a different
/// domain (by value). Propagators sum the revisions of the variables they
/// watch to detect whether anything changed since their last step.
#[derive(Clone, Debug)]
pub struct FdVariable {
    domain: Domain,
    revision: u64,
}

impl FdVariable {
    pub fn new(domain: Domain) -> FdVariable {
        emerald_assert_moderate!(!domain.is_empty(), "variables never hold an empty domain");
        FdVariable { domain, revision: 0 }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True iff the domain holds more than one value.
    pub fn is_undetermined(&self) -> bool {
        !self.domain.is_singleton()
    }

    /// Replaces the domain, bumping the revision iff the new domain differs
    /// from the current one. Returns the number of increments (0 or 1).
    pub fn set_domain(&mut self, domain: Domain) -> u64 {
        if self.domain == domain {
            return 0;
        }
        self.domain = domain;
        self.revision += 1;
        1
    }

    /// Narrows the domain to its intersection with `restriction`.
    ///
    /// The variable is left untouched when the intersection is empty; the
    /// caller unwinds with [`EmptyDomain`] instead.
    pub fn constrain(&mut self, restriction: &Domain) -> Result<u64, EmptyDomain> {
        let narrowed = self.domain.intersect(restriction);
        if narrowed.is_empty() {
            return Err(EmptyDomain);
        }
        Ok(self.set_domain(narrowed))
    }

    /// Restores a snapshot taken before a speculative step.
    pub(crate) fn restore(&mut self, domain: Domain, revision: u64) {
        self.domain = domain;
        self.revision = revision;
    }

    pub fn size(&self) -> u64 {
        self.domain.size()
    }

    pub fn min(&self) -> u64 {
        self.domain.min()
    }

    pub fn max(&self) -> u64 {
        self.domain.max()
    }

    pub fn median(&self) -> u64 {
        self.domain.median()
    }

    pub fn rough_median(&self) -> u64 {
        self.domain.rough_median()
    }
}
