//! Data assembly for the dashboard.

use time::Date;

use crate::{
    Error,
    datasets::TransactionSource,
    transaction::{Transaction, enrich},
};

/// Fetch a dataset and enrich its records into displayable transactions.
pub(crate) fn load_transactions(
    source: &dyn TransactionSource,
    dataset: &str,
) -> Result<Vec<Transaction>, Error> {
    let records = source
        .fetch_records(dataset)
        .inspect_err(|error| tracing::error!("could not fetch dataset {dataset}: {error}"))?;

    Ok(enrich(records))
}

/// Apply the filter bar to the transactions list.
///
/// The name matches case-insensitively anywhere in the customer name, and
/// the date bounds are inclusive. Transactions without a parseable purchase
/// date are excluded while either date bound is active, since there is no
/// date to compare against.
///
/// Only the transactions tab and the assistant context use this. The rewards
/// tables always aggregate the full dataset.
pub(crate) fn filter_bar_transactions(
    transactions: &[Transaction],
    name: Option<&str>,
    from: Option<Date>,
    to: Option<Date>,
) -> Vec<Transaction> {
    let name = name.map(str::to_lowercase);

    transactions
        .iter()
        .filter(|transaction| {
            let name_matches = match &name {
                Some(name) => transaction.customer_name.to_lowercase().contains(name),
                None => true,
            };
            if !name_matches {
                return false;
            }

            if from.is_some() || to.is_some() {
                let Some(date) = transaction.purchase_date else {
                    return false;
                };
                if from.is_some_and(|from| date < from) || to.is_some_and(|to| date > to) {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}
