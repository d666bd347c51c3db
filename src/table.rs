//! Shared shaping for the dashboard tables: typed cells, per-column
//! filtering, sorting, and pagination.
//!
//! Column filters match against the rendered cell text, so "n/a" finds the
//! rows with invalid dates and "120" finds a "$120.00" price.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    html::format_currency,
    pagination::{clamp_page, page_count},
};

/// A table cell with the type used for filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text, compared case-insensitively.
    Text(String),
    /// A whole number, e.g. an id or a points balance.
    Integer(i64),
    /// A dollar amount, rendered with two decimals.
    Money(f64),
    /// A calendar date; `None` renders as "N/A" and sorts first.
    Date(Option<Date>),
}

impl CellValue {
    /// The text shown in the cell, which is also the haystack for filters.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Money(amount) => format_currency(*amount),
            CellValue::Date(Some(date)) => date.to_string(),
            CellValue::Date(None) => "N/A".to_owned(),
        }
    }

    fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim();
        if filter.is_empty() {
            return true;
        }

        self.render().to_lowercase().contains(&filter.to_lowercase())
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(left), CellValue::Integer(right)) => left.cmp(right),
            (CellValue::Money(left), CellValue::Money(right)) => left.total_cmp(right),
            (CellValue::Date(left), CellValue::Date(right)) => left.cmp(right),
            (left, right) => left.render().to_lowercase().cmp(&right.render().to_lowercase()),
        }
    }
}

/// The direction a sorted column is ordered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Increasing values, the direction a freshly sorted column starts in.
    #[default]
    Asc,
    /// Decreasing values.
    Desc,
}

impl SortDirection {
    /// The opposite direction, used when a sorted header is clicked again.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// The value used in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One column of a dashboard table.
pub struct Column<R> {
    /// The stable field id used in query parameters, e.g. "customerId".
    pub field: &'static str,
    /// The header label shown to users.
    pub label: &'static str,
    /// Extracts this column's cell from a row.
    pub value: fn(&R) -> CellValue,
}

/// One page of shaped rows, ready to render.
pub struct TablePage<'r, R> {
    /// The rows on the current page, in display order.
    pub rows: Vec<&'r R>,
    /// How many rows survived filtering, across all pages.
    pub filtered_count: usize,
    /// The current page, clamped into range.
    pub page: usize,
    /// The number of pages after filtering.
    pub page_count: usize,
    /// The rows shown per page.
    pub per_page: usize,
}

/// Keep the rows whose cells match every given column filter.
///
/// Filters for fields that are not in `columns` match everything.
pub fn filter_rows<'r, R>(
    rows: &'r [R],
    columns: &[Column<R>],
    filters: &[(&str, String)],
) -> Vec<&'r R> {
    rows.iter()
        .filter(|row| {
            filters.iter().all(|(field, filter)| {
                match columns.iter().find(|column| column.field == *field) {
                    Some(column) => (column.value)(row).matches(filter),
                    None => true,
                }
            })
        })
        .collect()
}

/// Sort rows by the named column, keeping the prior order of equal rows.
///
/// An unknown field leaves the rows untouched.
pub fn sort_rows<R>(
    rows: &mut [&R],
    columns: &[Column<R>],
    sort: Option<(&str, SortDirection)>,
) {
    let Some((field, direction)) = sort else {
        return;
    };
    let Some(column) = columns.iter().find(|column| column.field == field) else {
        return;
    };

    rows.sort_by(|left, right| {
        let ordering = (column.value)(left).compare(&(column.value)(right));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filter, sort, and slice rows into the requested page.
pub fn shape<'r, R>(
    rows: &'r [R],
    columns: &[Column<R>],
    filters: &[(&str, String)],
    sort: Option<(&str, SortDirection)>,
    page: usize,
    per_page: usize,
) -> TablePage<'r, R> {
    let mut shaped = filter_rows(rows, columns, filters);
    sort_rows(&mut shaped, columns, sort);

    let filtered_count = shaped.len();
    let page_count = page_count(filtered_count, per_page);
    let page = clamp_page(page, page_count);
    let start = (page - 1) * per_page;
    let rows = shaped.into_iter().skip(start).take(per_page).collect();

    TablePage {
        rows,
        filtered_count,
        page,
        page_count,
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{CellValue, Column, SortDirection, filter_rows, shape, sort_rows};

    struct Row {
        product: &'static str,
        price: f64,
        purchased_on: Option<time::Date>,
        points: u64,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column {
                field: "productPurchased",
                label: "Product",
                value: |row| CellValue::Text(row.product.to_owned()),
            },
            Column {
                field: "price",
                label: "Price",
                value: |row| CellValue::Money(row.price),
            },
            Column {
                field: "purchaseDate",
                label: "Purchase Date",
                value: |row| CellValue::Date(row.purchased_on),
            },
            Column {
                field: "rewardPoints",
                label: "Reward Points",
                value: |row| CellValue::Integer(row.points as i64),
            },
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                product: "Laptop",
                price: 1200.0,
                purchased_on: Some(date!(2024 - 01 - 15)),
                points: 2250,
            },
            Row {
                product: "Headphones",
                price: 75.5,
                purchased_on: Some(date!(2024 - 02 - 20)),
                points: 25,
            },
            Row {
                product: "Keyboard",
                price: 120.0,
                purchased_on: None,
                points: 90,
            },
            Row {
                product: "Lamp",
                price: 75.5,
                purchased_on: Some(date!(2024 - 01 - 02)),
                points: 25,
            },
        ]
    }

    #[test]
    fn text_filters_are_case_insensitive() {
        let rows = rows();

        let got = filter_rows(&rows, &columns(), &[("productPurchased", "la".to_owned())]);

        let products: Vec<_> = got.iter().map(|row| row.product).collect();
        assert_eq!(products, vec!["Laptop", "Lamp"]);
    }

    #[test]
    fn money_filters_match_the_rendered_amount() {
        let rows = rows();

        let got = filter_rows(&rows, &columns(), &[("price", "1,200".to_owned())]);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].product, "Laptop");
    }

    #[test]
    fn date_filters_match_missing_dates_as_na() {
        let rows = rows();

        let got = filter_rows(&rows, &columns(), &[("purchaseDate", "n/a".to_owned())]);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].product, "Keyboard");
    }

    #[test]
    fn filters_combine_across_columns() {
        let rows = rows();

        let got = filter_rows(
            &rows,
            &columns(),
            &[
                ("price", "75.50".to_owned()),
                ("purchaseDate", "2024-01".to_owned()),
            ],
        );

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].product, "Lamp");
    }

    #[test]
    fn blank_and_unknown_filters_match_everything() {
        let rows = rows();

        let got = filter_rows(
            &rows,
            &columns(),
            &[
                ("productPurchased", "  ".to_owned()),
                ("unknownField", "x".to_owned()),
            ],
        );

        assert_eq!(got.len(), 4);
    }

    #[test]
    fn sorts_numbers_numerically() {
        let rows = rows();
        let columns = columns();
        let mut shaped: Vec<&Row> = rows.iter().collect();

        sort_rows(&mut shaped, &columns, Some(("rewardPoints", SortDirection::Desc)));

        let points: Vec<_> = shaped.iter().map(|row| row.points).collect();
        assert_eq!(points, vec![2250, 90, 25, 25]);
    }

    #[test]
    fn sorting_is_stable_for_equal_values() {
        let rows = rows();
        let columns = columns();
        let mut shaped: Vec<&Row> = rows.iter().collect();

        sort_rows(&mut shaped, &columns, Some(("price", SortDirection::Asc)));

        // Headphones appears before Lamp because it did in the input.
        let products: Vec<_> = shaped.iter().map(|row| row.product).collect();
        assert_eq!(products, vec!["Headphones", "Lamp", "Keyboard", "Laptop"]);
    }

    #[test]
    fn missing_dates_sort_before_real_dates() {
        let rows = rows();
        let columns = columns();
        let mut shaped: Vec<&Row> = rows.iter().collect();

        sort_rows(&mut shaped, &columns, Some(("purchaseDate", SortDirection::Asc)));

        let products: Vec<_> = shaped.iter().map(|row| row.product).collect();
        assert_eq!(products, vec!["Keyboard", "Lamp", "Laptop", "Headphones"]);
    }

    #[test]
    fn shapes_rows_into_pages() {
        let rows = rows();
        let columns = columns();

        let page = shape(&rows, &columns, &[], None, 2, 3);

        assert_eq!(page.page, 2);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.filtered_count, 4);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].product, "Lamp");
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_last_page() {
        let rows = rows();
        let columns = columns();

        let page = shape(&rows, &columns, &[], None, 99, 3);

        assert_eq!(page.page, 2);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn an_empty_table_still_has_one_page() {
        let rows: Vec<Row> = Vec::new();
        let columns = columns();

        let page = shape(&rows, &columns, &[], None, 1, 10);

        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn renders_cells_by_type() {
        assert_eq!(CellValue::Text("Laptop".to_owned()).render(), "Laptop");
        assert_eq!(CellValue::Integer(90).render(), "90");
        assert_eq!(CellValue::Money(120.0).render(), "$120.00");
        assert_eq!(
            CellValue::Date(Some(date!(2024 - 01 - 15))).render(),
            "2024-01-15"
        );
        assert_eq!(CellValue::Date(None).render(), "N/A");
    }
}
