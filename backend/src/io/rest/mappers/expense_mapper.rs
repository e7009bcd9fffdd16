//! Conversions between domain expenses and the DTOs in `shared`.
use crate::domain::models::{Expense as DomainExpense, YearMonth};
use crate::domain::MonthlySummary;
use rust_decimal::Decimal;
use shared::{
    Expense as SharedExpense, MonthlySeriesResponse, MonthlySummaryResponse, MonthlyTotal,
};
use std::collections::BTreeMap;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: expense.id.to_string(),
            date: expense.date,
            description: expense.description,
            amount: expense.amount,
        }
    }

    pub fn summary_to_dto(summary: MonthlySummary) -> MonthlySummaryResponse {
        MonthlySummaryResponse {
            year: summary.period.year(),
            month: summary.period.month(),
            label: summary.period.label(),
            total: summary.total,
        }
    }

    pub fn series_to_dto(series: BTreeMap<YearMonth, Decimal>) -> MonthlySeriesResponse {
        MonthlySeriesResponse {
            series: series
                .into_iter()
                .map(|(month, total)| MonthlyTotal {
                    month: month.to_string(),
                    total,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseId;

    #[test]
    fn test_to_dto_passes_fields_through() {
        let expense = DomainExpense {
            id: ExpenseId::from("abc"),
            date: "2024-05-01".into(),
            description: "Lunch".into(),
            amount: "10.00".into(),
        };

        let dto = ExpenseMapper::to_dto(expense);

        assert_eq!(dto.id, "abc");
        assert_eq!(dto.amount, "10.00");
    }

    #[test]
    fn test_series_keeps_order() {
        let mut series = BTreeMap::new();
        series.insert(YearMonth::new(2024, 6).unwrap(), Decimal::new(5, 0));
        series.insert(YearMonth::new(2024, 5).unwrap(), Decimal::new(30, 0));

        let dto = ExpenseMapper::series_to_dto(series);

        assert_eq!(dto.series[0].month, "2024-05");
        assert_eq!(dto.series[1].month, "2024-06");
    }
}
