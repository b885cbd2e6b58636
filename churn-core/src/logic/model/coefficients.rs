//! Coefficient Table
//!
//! Fixed logistic-regression weights shared by the local scorer and the
//! local explainer. Built once, referenced through `Arc`.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::types::{CustomerRecord, Plan, Region};

/// Intercept of the local logit
pub const INTERCEPT: f64 = 0.5;

static DEFAULT_TABLE: Lazy<Arc<CoefficientTable>> =
    Lazy::new(|| Arc::new(CoefficientTable::churn_default()));

/// Continuous attributes of a customer record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousFeature {
    Age,
    TenureMonths,
    MonthlySpend,
    SupportTickets,
}

impl ContinuousFeature {
    pub fn value(self, record: &CustomerRecord) -> f64 {
        match self {
            Self::Age => f64::from(record.age),
            Self::TenureMonths => f64::from(record.tenure_months),
            Self::MonthlySpend => record.monthly_spend,
            Self::SupportTickets => f64::from(record.support_tickets_last_90d),
        }
    }
}

/// What a coefficient multiplies
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Per-unit weight
    Continuous(ContinuousFeature),
    /// One-hot weight, applied when the plan matches
    Plan(Plan),
    /// One-hot weight, applied when the region matches
    Region(Region),
}

/// A single named weight
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: &'static str,
    pub term: Term,
    pub weight: f64,
    /// Included in the local explanation list
    pub explained: bool,
}

impl Coefficient {
    fn new(name: &'static str, term: Term, weight: f64, explained: bool) -> Self {
        Self { name, term, weight, explained }
    }

    /// Contribution of this coefficient to the logit of `record`.
    ///
    /// Unmatched categories and non-finite inputs contribute zero.
    pub fn contribution(&self, record: &CustomerRecord) -> f64 {
        match &self.term {
            Term::Continuous(feature) => {
                let value = feature.value(record);
                if value.is_finite() {
                    value * self.weight
                } else {
                    0.0
                }
            }
            Term::Plan(plan) if *plan == record.plan => self.weight,
            Term::Region(region) if *region == record.region => self.weight,
            Term::Plan(_) | Term::Region(_) => 0.0,
        }
    }
}

/// Immutable coefficient table
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    intercept: f64,
    entries: Vec<Coefficient>,
}

impl CoefficientTable {
    /// The churn approximation used whenever the remote service is offline
    pub fn churn_default() -> Self {
        use ContinuousFeature::*;

        Self {
            intercept: INTERCEPT,
            entries: vec![
                Coefficient::new("age", Term::Continuous(Age), -0.0123, false),
                Coefficient::new("tenure_months", Term::Continuous(TenureMonths), -0.0456, true),
                Coefficient::new("monthly_spend", Term::Continuous(MonthlySpend), -0.0089, false),
                Coefficient::new(
                    "support_tickets_last_90d",
                    Term::Continuous(SupportTickets),
                    0.3421,
                    true,
                ),
                Coefficient::new("plan_basic", Term::Plan(Plan::Basic), 0.5234, true),
                Coefficient::new("plan_pro", Term::Plan(Plan::Pro), 0.1234, true),
                Coefficient::new("plan_enterprise", Term::Plan(Plan::Enterprise), -0.6234, true),
                Coefficient::new("region_latam", Term::Region(Region::Latam), 0.2345, true),
                Coefficient::new("region_na", Term::Region(Region::Na), -0.1234, true),
                Coefficient::new("region_eu", Term::Region(Region::Eu), -0.0987, true),
            ],
        }
    }

    /// Process-wide instance of [`CoefficientTable::churn_default`]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_TABLE)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Entries in table order
    pub fn entries(&self) -> &[Coefficient] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Coefficient> {
        self.entries.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(plan: &str, region: &str) -> CustomerRecord {
        CustomerRecord {
            age: 40,
            tenure_months: 10,
            monthly_spend: 100.0,
            support_tickets_last_90d: 2,
            plan: Plan::from(plan),
            region: Region::from(region),
        }
    }

    #[test]
    fn test_shared_table_is_single_instance() {
        let a = CoefficientTable::shared();
        let b = CoefficientTable::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, CoefficientTable::churn_default());
    }

    #[test]
    fn test_one_hot_matches_only_its_value() {
        let table = CoefficientTable::churn_default();
        let basic = table.get("plan_basic").unwrap();

        assert_eq!(basic.contribution(&record("basic", "na")), 0.5234);
        assert_eq!(basic.contribution(&record("pro", "na")), 0.0);
        assert_eq!(basic.contribution(&record("platinum", "na")), 0.0);
    }

    #[test]
    fn test_non_finite_spend_contributes_zero() {
        let table = CoefficientTable::churn_default();
        let spend = table.get("monthly_spend").unwrap();

        let mut r = record("basic", "eu");
        r.monthly_spend = f64::NAN;
        assert_eq!(spend.contribution(&r), 0.0);

        r.monthly_spend = f64::INFINITY;
        assert_eq!(spend.contribution(&r), 0.0);
    }

    #[test]
    fn test_continuous_weights_not_all_explained() {
        let table = CoefficientTable::churn_default();
        assert!(!table.get("age").unwrap().explained);
        assert!(!table.get("monthly_spend").unwrap().explained);
        assert!(table.get("tenure_months").unwrap().explained);
    }
}
