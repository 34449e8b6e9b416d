use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    OneTime,
    Recurring,
}

impl Treatment {
    pub const ALL: [Treatment; 2] = [Treatment::OneTime, Treatment::Recurring];
}

/// Cost categories shared by both treatments. The total is not a category of
/// its own; it is derived from the category costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    InitialImplant,
    FollowUpMaintenance,
    SurgicalRevision,
    Rehospitalization,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        CostCategory::InitialImplant,
        CostCategory::FollowUpMaintenance,
        CostCategory::SurgicalRevision,
        CostCategory::Rehospitalization,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CostCategory::InitialImplant => "Initial Implant",
            CostCategory::FollowUpMaintenance => "Follow-up Maintenance",
            CostCategory::SurgicalRevision => "Surgical Revision",
            CostCategory::Rehospitalization => "Rehospitalization",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            CostCategory::InitialImplant => "Implant",
            CostCategory::FollowUpMaintenance => "Maintenance",
            CostCategory::SurgicalRevision => "Surgery",
            CostCategory::Rehospitalization => "Rehospitalization",
        }
    }
}

pub const TOTAL_CATEGORY_NAME: &str = "5-Year Total";

/// Per-patient costs are positive, so a distribution must keep zero this many
/// standard deviations below its mean.
pub const MAX_STD_DEVS_BELOW_MEAN: f64 = 6.0;

/// Mean and standard deviation of simulated per-patient costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostDistribution {
    mean: f64,
    std_dev: f64,
}

impl CostDistribution {
    /// Returns `None` unless the mean is finite and positive, the standard
    /// deviation is finite and not negative, and the mean lies more than
    /// [`MAX_STD_DEVS_BELOW_MEAN`] standard deviations above zero.
    pub fn new(mean: f64, std_dev: f64) -> Option<Self> {
        if !mean.is_finite() || mean <= 0.0 || !std_dev.is_finite() || std_dev < 0.0 {
            return None;
        }
        if mean - MAX_STD_DEVS_BELOW_MEAN * std_dev <= 0.0 {
            return None;
        }
        Some(Self { mean, std_dev })
    }

    pub(crate) const fn from_constants(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryCosts {
    pub initial_implant: f64,
    pub follow_up_maintenance: f64,
    pub surgical_revision: f64,
    pub rehospitalization: f64,
}

impl CategoryCosts {
    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::InitialImplant => self.initial_implant,
            CostCategory::FollowUpMaintenance => self.follow_up_maintenance,
            CostCategory::SurgicalRevision => self.surgical_revision,
            CostCategory::Rehospitalization => self.rehospitalization,
        }
    }

    pub fn total(&self) -> f64 {
        CostCategory::ALL.iter().map(|category| self.get(*category)).sum()
    }
}

/// A therapy paid once. Only the initial implant carries a cost.
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimeProfile {
    pub name: String,
    pub chart_label: String,
    pub distribution: CostDistribution,
    pub initial_cost: f64,
}

impl OneTimeProfile {
    pub fn costs(&self) -> CategoryCosts {
        CategoryCosts {
            initial_implant: self.initial_cost,
            ..CategoryCosts::default()
        }
    }
}

impl Default for OneTimeProfile {
    fn default() -> Self {
        Self {
            name: "NEUROWEAVE".to_string(),
            chart_label: "NEUROWEAVE".to_string(),
            distribution: CostDistribution::from_constants(12000.0, 500.0),
            initial_cost: 12000.0,
        }
    }
}

/// A treatment with an initial implant followed by recurring expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringProfile {
    pub name: String,
    pub chart_label: String,
    pub distribution: CostDistribution,
    pub costs: CategoryCosts,
}

impl Default for RecurringProfile {
    fn default() -> Self {
        Self {
            name: "VP Shunt".to_string(),
            chart_label: "VP Shunt (Codman/Medtronic)".to_string(),
            distribution: CostDistribution::from_constants(40000.0, 3000.0),
            costs: CategoryCosts {
                initial_implant: 10000.0,
                follow_up_maintenance: 10000.0,
                surgical_revision: 10000.0,
                rehospitalization: 10000.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_distribution_rejects_invalid_parameters() {
        assert!(CostDistribution::new(12000.0, 500.0).is_some());
        assert!(CostDistribution::new(12000.0, 0.0).is_some());
        assert!(CostDistribution::new(0.0, 500.0).is_none());
        assert!(CostDistribution::new(12000.0, -1.0).is_none());
        assert!(CostDistribution::new(f64::NAN, 500.0).is_none());
        assert!(CostDistribution::new(12000.0, f64::INFINITY).is_none());
    }

    #[test]
    fn cost_distribution_rejects_spread_reaching_zero() {
        assert!(CostDistribution::new(10.0, 1000.0).is_none());
        assert!(CostDistribution::new(6000.0, 1000.0).is_none());
        assert!(CostDistribution::new(6001.0, 1000.0).is_some());
        assert!(CostDistribution::new(40000.0, 3000.0).is_some());
    }

    #[test]
    fn one_time_costs_only_carry_initial_implant() {
        let profile = OneTimeProfile::default();
        let costs = profile.costs();
        assert_eq!(costs.initial_implant, 12000.0);
        assert_eq!(costs.follow_up_maintenance, 0.0);
        assert_eq!(costs.surgical_revision, 0.0);
        assert_eq!(costs.rehospitalization, 0.0);
        assert_eq!(costs.total(), 12000.0);
    }

    #[test]
    fn recurring_total_sums_all_categories() {
        assert_eq!(RecurringProfile::default().costs.total(), 40000.0);
    }
}
