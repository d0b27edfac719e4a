use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// months between quarterly prepayments
pub const QUARTER_MONTHS: u32 = 3;

/// extra principal payments on top of the EMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrepaymentPlan {
    /// applied after every EMI
    pub monthly: Money,
    /// applied after the EMI of months 3, 6, 9, ...
    pub quarterly: Money,
    /// applied once, upfront, before any interest accrues
    pub one_time: Money,
}

impl PrepaymentPlan {
    pub fn is_empty(&self) -> bool {
        !self.monthly.is_positive() && !self.quarterly.is_positive() && !self.one_time.is_positive()
    }

    pub fn is_quarter_end(month: u32) -> bool {
        month > 0 && month % QUARTER_MONTHS == 0
    }

    /// scheduled periodic prepayments for a 1-based month, in application order
    pub fn periodic_for_month(&self, month: u32) -> impl Iterator<Item = Money> {
        let monthly = self.monthly.is_positive().then_some(self.monthly);
        let quarterly = (Self::is_quarter_end(month) && self.quarterly.is_positive())
            .then_some(self.quarterly);
        monthly.into_iter().chain(quarterly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        assert!(PrepaymentPlan::default().is_empty());

        let plan = PrepaymentPlan {
            one_time: Money::from_major(100_000),
            ..PrepaymentPlan::default()
        };
        assert!(!plan.is_empty());
        assert_eq!(plan.periodic_for_month(3).count(), 0);
    }

    #[test]
    fn test_quarter_ends() {
        let quarter_ends: Vec<u32> = (1..=12).filter(|m| PrepaymentPlan::is_quarter_end(*m)).collect();
        assert_eq!(quarter_ends, vec![3, 6, 9, 12]);
        assert!(!PrepaymentPlan::is_quarter_end(0));
    }

    #[test]
    fn test_scheduled_amounts() {
        let plan = PrepaymentPlan {
            monthly: Money::from_major(2_000),
            quarterly: Money::from_major(10_000),
            one_time: Money::from_major(50_000),
        };

        assert_eq!(plan.periodic_for_month(1).collect::<Vec<_>>(), vec![Money::from_major(2_000)]);

        // monthly is applied before quarterly
        let order: Vec<Money> = plan.periodic_for_month(6).collect();
        assert_eq!(order, vec![Money::from_major(2_000), Money::from_major(10_000)]);

        // one-time never appears in the periodic schedule
        let total: Money = (1..=12).flat_map(|m| plan.periodic_for_month(m)).sum();
        assert_eq!(total, Money::from_major(64_000));
    }
}
