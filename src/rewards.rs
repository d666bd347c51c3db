//! Monthly and total reward aggregation over enriched transactions.

use std::collections::HashMap;

use time::Month;

use crate::transaction::Transaction;

/// The reward points one customer earned in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReward {
    /// The identifier of the customer.
    pub customer_id: u64,
    /// The customer name captured from the first transaction seen for this
    /// customer and month.
    pub name: String,
    /// The calendar month the points were earned in.
    pub month: Month,
    /// The calendar year the points were earned in.
    pub year: i32,
    /// The points earned in this month.
    pub points: u64,
}

/// The total reward points earned under one customer name.
///
/// Totals group by name alone, so distinct customer ids that share a name
/// merge into a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalReward {
    /// The customer name the points are reported under.
    pub name: String,
    /// The summed points across all months for this name.
    pub total_points: u64,
}

/// Sum reward points per customer per calendar month.
///
/// Transactions without a parsed purchase date are skipped silently. Rows
/// appear in the order their customer and month combination was first seen,
/// and each combination appears at most once.
pub fn monthly_rewards(transactions: &[Transaction]) -> Vec<MonthlyReward> {
    let mut rows: Vec<MonthlyReward> = Vec::new();
    let mut row_index: HashMap<(u64, Month, i32), usize> = HashMap::new();

    for transaction in transactions {
        let Some(date) = transaction.purchase_date else {
            continue;
        };

        let key = (transaction.customer_id, date.month(), date.year());
        match row_index.get(&key) {
            Some(&index) => rows[index].points += transaction.reward_points,
            None => {
                row_index.insert(key, rows.len());
                rows.push(MonthlyReward {
                    customer_id: transaction.customer_id,
                    name: transaction.customer_name.clone(),
                    month: date.month(),
                    year: date.year(),
                    points: transaction.reward_points,
                });
            }
        }
    }

    rows
}

/// Sum monthly reward points per customer name.
///
/// Rows appear in the order their name was first seen in `monthly`, and the
/// sum of all `total_points` equals the sum of all monthly `points`.
pub fn total_rewards(monthly: &[MonthlyReward]) -> Vec<TotalReward> {
    let mut rows: Vec<TotalReward> = Vec::new();
    let mut row_index: HashMap<&str, usize> = HashMap::new();

    for reward in monthly {
        match row_index.get(reward.name.as_str()) {
            Some(&index) => rows[index].total_points += reward.points,
            None => {
                row_index.insert(&reward.name, rows.len());
                rows.push(TotalReward {
                    name: reward.name.clone(),
                    total_points: reward.points,
                });
            }
        }
    }

    rows
}
