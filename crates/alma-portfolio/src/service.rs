//! Portfolio service over an injected signal accessor

use crate::{
    analyze_snapshot, build_allocation, find_gaps, AllocationPlan, GapAnalysis, PortfolioAnalysis,
    PortfolioConfig, PortfolioError,
};
use alma_domain::{InterventionId, PortfolioConstraints, PortfolioSignals, SignalAccessor, SnapshotEntry};

/// Entry point for portfolio operations
///
/// Every call fetches exactly one snapshot from the accessor and runs the
/// pure analyzer, builder or gap analyzer over it. Nothing is cached between
/// calls.
///
/// # Examples
///
/// ```
/// use alma_portfolio::PortfolioService;
/// use alma_store::MemoryStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = PortfolioService::with_defaults(MemoryStore::new());
/// let plan = service.build_portfolio(1_000_000.0, None)?;
/// assert!(plan.entries.is_empty());
/// assert_eq!(plan.total_allocated, 0.0);
/// # Ok(())
/// # }
/// ```
pub struct PortfolioService<A> {
    accessor: A,
    config: PortfolioConfig,
}

impl<A> PortfolioService<A>
where
    A: SignalAccessor,
    A::Error: std::fmt::Display,
{
    /// Create a service, rejecting an invalid configuration
    pub fn new(accessor: A, config: PortfolioConfig) -> Result<Self, PortfolioError> {
        config.validate()?;
        Ok(Self { accessor, config })
    }

    /// Create a service with the default configuration
    pub fn with_defaults(accessor: A) -> Self {
        Self {
            accessor,
            config: PortfolioConfig::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// The injected accessor
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Categorize the current snapshot into the five opportunity lists
    pub fn analyze(
        &self,
        constraints: Option<&PortfolioConstraints>,
    ) -> Result<PortfolioAnalysis, PortfolioError> {
        let constraints = self.resolve_constraints(constraints);
        tracing::debug!(
            "analyze: max_untested={} min_community={} harm_cap={}",
            constraints.max_untested_allocation,
            constraints.min_community_endorsed,
            constraints.harm_risk_cap.label()
        );

        let snapshot = self.snapshot("analyze", &constraints, None)?;
        let analysis = analyze_snapshot(&snapshot, &self.config.analyzer);

        for (category, size) in analysis.sizes() {
            tracing::debug!("{}: {} interventions", category, size);
        }
        tracing::info!("Analyzed {} interventions", snapshot.len());
        Ok(analysis)
    }

    /// Allocate a budget across the current snapshot
    ///
    /// The analyzer runs over the same snapshot the plan is built from.
    pub fn build_portfolio(
        &self,
        total_budget: f64,
        constraints: Option<&PortfolioConstraints>,
    ) -> Result<AllocationPlan, PortfolioError> {
        let constraints = self.resolve_constraints(constraints);
        tracing::debug!(
            "build_portfolio: budget={} max_untested={} min_community={} harm_cap={}",
            total_budget,
            constraints.max_untested_allocation,
            constraints.min_community_endorsed,
            constraints.harm_risk_cap.label()
        );

        let snapshot = self.snapshot("build_portfolio", &constraints, Some(total_budget))?;
        let analysis = analyze_snapshot(&snapshot, &self.config.analyzer);
        let plan = build_allocation(total_budget, &analysis, &self.config.allocation);

        tracing::info!(
            "Allocated {:.2} of {:.2} across {} interventions",
            plan.total_allocated,
            total_budget,
            plan.entries.len()
        );
        Ok(plan)
    }

    /// Score coverage gaps in the current snapshot
    pub fn identify_gaps(&self) -> Result<GapAnalysis, PortfolioError> {
        let constraints = self.resolve_constraints(None);
        let snapshot = self.snapshot("identify_gaps", &constraints, None)?;
        let gaps = find_gaps(&snapshot, &self.config.gaps);

        tracing::info!(
            "Found {} geographic, {} cohort and {} type gaps",
            gaps.geographic_gaps.len(),
            gaps.cohort_gaps.len(),
            gaps.type_gaps.len()
        );
        Ok(gaps)
    }

    /// Signals for one intervention, or `None` if it is unknown upstream
    pub fn signals_for(&self, id: InterventionId) -> Result<Option<PortfolioSignals>, PortfolioError> {
        self.accessor.fetch_signals(id).map_err(|e| {
            tracing::error!("Signal lookup failed for {}: {}", id, e);
            PortfolioError::UpstreamUnavailable {
                operation: "signals_for",
                message: e.to_string(),
            }
        })
    }

    fn resolve_constraints(&self, constraints: Option<&PortfolioConstraints>) -> PortfolioConstraints {
        let constraints = constraints
            .cloned()
            .unwrap_or_else(|| self.config.constraints.to_constraints());
        if let Err(e) = constraints.validate() {
            tracing::warn!("Constraints out of range, carried through unchanged: {}", e);
        }
        constraints
    }

    /// Fetch one snapshot and keep only approved or published records
    fn snapshot(
        &self,
        operation: &'static str,
        constraints: &PortfolioConstraints,
        budget: Option<f64>,
    ) -> Result<Vec<SnapshotEntry>, PortfolioError> {
        let fetched = self.accessor.fetch_snapshot().map_err(|e| {
            tracing::error!(
                "{} failed: budget={:?} constraints={:?}: {}",
                operation,
                budget,
                constraints,
                e
            );
            PortfolioError::UpstreamUnavailable {
                operation,
                message: e.to_string(),
            }
        })?;

        let total = fetched.len();
        let snapshot: Vec<SnapshotEntry> = fetched
            .into_iter()
            .filter(|entry| entry.record.review_status.is_publishable())
            .collect();

        if snapshot.len() < total {
            tracing::warn!(
                "{}: skipped {} interventions not approved or published",
                operation,
                total - snapshot.len()
            );
        }
        Ok(snapshot)
    }
}
