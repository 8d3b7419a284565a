//! Database enums shared by entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a transaction is income or expense, as stored in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money spent.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<TransactionKind> for moneta_core::reports::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<moneta_core::reports::TransactionKind> for TransactionKind {
    fn from(kind: moneta_core::reports::TransactionKind) -> Self {
        match kind {
            moneta_core::reports::TransactionKind::Income => Self::Income,
            moneta_core::reports::TransactionKind::Expense => Self::Expense,
        }
    }
}

/// Budget recurrence period, as stored in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_period")]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Monthly budget.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Quarterly budget.
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// Annual budget.
    #[sea_orm(string_value = "annual")]
    Annual,
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            _ => Err(format!("Unknown budget period: {s}")),
        }
    }
}

impl BudgetPeriod {
    /// Returns the lowercase string form used in APIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_with_core() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let core: moneta_core::reports::TransactionKind = kind.into();
            assert_eq!(TransactionKind::from(core), kind);
        }
    }

    #[test]
    fn test_budget_period_parsing() {
        assert_eq!("monthly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Monthly));
        assert_eq!(
            "quarterly".parse::<BudgetPeriod>(),
            Ok(BudgetPeriod::Quarterly)
        );
        assert_eq!("annual".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Annual));
        assert!("weekly".parse::<BudgetPeriod>().is_err());
    }
}
