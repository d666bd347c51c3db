//! Query-string state for the dashboard page.
//!
//! The whole dashboard is driven by URL parameters so that filtered, sorted,
//! and paginated views can be bookmarked and shared. [DashboardQuery] is both
//! the extractor target and the URL encoder used to build links from
//! already-normalized values.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    endpoints,
    pagination::{DEFAULT_PER_PAGE, PER_PAGE_OPTIONS, normalize_per_page},
    table::SortDirection,
    transaction::parse_purchase_date,
};

/// The dashboard tab being viewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    /// The enriched transactions table.
    #[default]
    Transactions,
    /// Reward points grouped by customer and month.
    MonthlyRewards,
    /// Reward points totalled per customer.
    TotalRewards,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 3] = [Tab::Transactions, Tab::MonthlyRewards, Tab::TotalRewards];

    /// The label shown on the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Tab::Transactions => "Transactions",
            Tab::MonthlyRewards => "Monthly Rewards",
            Tab::TotalRewards => "Total Rewards",
        }
    }

    /// The value this tab serializes to in query strings.
    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            Tab::Transactions => "transactions",
            Tab::MonthlyRewards => "monthly-rewards",
            Tab::TotalRewards => "total-rewards",
        }
    }

    /// The route serving this tab's table fragment.
    pub(crate) fn partial_route(self) -> &'static str {
        match self {
            Tab::Transactions => endpoints::TRANSACTIONS_PARTIAL,
            Tab::MonthlyRewards => endpoints::MONTHLY_REWARDS_PARTIAL,
            Tab::TotalRewards => endpoints::TOTAL_REWARDS_PARTIAL,
        }
    }

    /// The column field ids this tab's table accepts in filter and sort
    /// parameters.
    pub(crate) fn filter_fields(self) -> &'static [&'static str] {
        match self {
            Tab::Transactions => &[
                "transactionId",
                "customerId",
                "customerName",
                "purchaseDate",
                "productPurchased",
                "price",
                "rewardPoints",
            ],
            Tab::MonthlyRewards => &["customerId", "name", "month", "year", "points"],
            Tab::TotalRewards => &["name", "totalPoints"],
        }
    }
}

/// The full state of the dashboard as carried in the URL.
///
/// Every field is optional so that partial URLs deserialize cleanly. Column
/// filters use an `f.` prefix to keep them apart from the filter bar
/// parameters, e.g. `f.name` filters the monthly rewards name column while
/// `name` is the customer search box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// The dataset file the dashboard is reading from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// The active tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<Tab>,
    /// Customer name search from the filter bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start of the purchase date range from the filter bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End of the purchase date range from the filter bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// The column field id the active table is sorted by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// The sort direction, only meaningful alongside `sort`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<SortDirection>,
    /// The current table page, starting from 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Rows shown per table page.
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    /// Column filter on the transaction id.
    #[serde(rename = "f.transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id_filter: Option<String>,
    /// Column filter on the customer id.
    #[serde(rename = "f.customerId", skip_serializing_if = "Option::is_none")]
    pub customer_id_filter: Option<String>,
    /// Column filter on the customer name in the transactions table.
    #[serde(rename = "f.customerName", skip_serializing_if = "Option::is_none")]
    pub customer_name_filter: Option<String>,
    /// Column filter on the purchase date.
    #[serde(rename = "f.purchaseDate", skip_serializing_if = "Option::is_none")]
    pub purchase_date_filter: Option<String>,
    /// Column filter on the product.
    #[serde(rename = "f.productPurchased", skip_serializing_if = "Option::is_none")]
    pub product_filter: Option<String>,
    /// Column filter on the price.
    #[serde(rename = "f.price", skip_serializing_if = "Option::is_none")]
    pub price_filter: Option<String>,
    /// Column filter on the reward points earned by a transaction.
    #[serde(rename = "f.rewardPoints", skip_serializing_if = "Option::is_none")]
    pub reward_points_filter: Option<String>,
    /// Column filter on the customer name in the rewards tables.
    #[serde(rename = "f.name", skip_serializing_if = "Option::is_none")]
    pub name_filter: Option<String>,
    /// Column filter on the month name.
    #[serde(rename = "f.month", skip_serializing_if = "Option::is_none")]
    pub month_filter: Option<String>,
    /// Column filter on the year.
    #[serde(rename = "f.year", skip_serializing_if = "Option::is_none")]
    pub year_filter: Option<String>,
    /// Column filter on the monthly points.
    #[serde(rename = "f.points", skip_serializing_if = "Option::is_none")]
    pub points_filter: Option<String>,
    /// Column filter on the total points.
    #[serde(rename = "f.totalPoints", skip_serializing_if = "Option::is_none")]
    pub total_points_filter: Option<String>,
}

impl DashboardQuery {
    /// The active tab, defaulting to transactions.
    pub fn active_tab(&self) -> Tab {
        self.tab.unwrap_or_default()
    }

    /// The selected dataset name.
    pub fn dataset_name(&self) -> &str {
        self.dataset.as_deref().unwrap_or_default()
    }

    /// The customer name search, if one is set.
    pub fn name_search(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The parsed start of the purchase date range.
    pub fn from_date(&self) -> Option<Date> {
        self.from.as_deref().and_then(parse_purchase_date)
    }

    /// The parsed end of the purchase date range.
    pub fn to_date(&self) -> Option<Date> {
        self.to.as_deref().and_then(parse_purchase_date)
    }

    /// The current page, starting from 1.
    pub fn current_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// The rows shown per page, falling back to the default for values
    /// outside the offered options.
    pub fn rows_per_page(&self) -> usize {
        normalize_per_page(self.per_page)
    }

    /// The sort key for the table engine.
    pub(crate) fn sort_for_table(&self) -> Option<(&str, SortDirection)> {
        self.sort
            .as_deref()
            .map(|field| (field, self.dir.unwrap_or_default()))
    }

    /// The column filters that apply to the active tab, skipping blanks.
    pub(crate) fn active_filters(&self) -> Vec<(&'static str, String)> {
        self.active_tab()
            .filter_fields()
            .iter()
            .filter_map(|field| {
                self.filter_value(field)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (*field, value.to_owned()))
            })
            .collect()
    }

    /// The current filter text for a column field id.
    pub(crate) fn filter_value(&self, field: &str) -> Option<&str> {
        let value = match field {
            "transactionId" => &self.transaction_id_filter,
            "customerId" => &self.customer_id_filter,
            "customerName" => &self.customer_name_filter,
            "purchaseDate" => &self.purchase_date_filter,
            "productPurchased" => &self.product_filter,
            "price" => &self.price_filter,
            "rewardPoints" => &self.reward_points_filter,
            "name" => &self.name_filter,
            "month" => &self.month_filter,
            "year" => &self.year_filter,
            "points" => &self.points_filter,
            "totalPoints" => &self.total_points_filter,
            _ => &None,
        };

        value.as_deref()
    }

    fn filter_slots(&mut self) -> [(&'static str, &mut Option<String>); 12] {
        [
            ("transactionId", &mut self.transaction_id_filter),
            ("customerId", &mut self.customer_id_filter),
            ("customerName", &mut self.customer_name_filter),
            ("purchaseDate", &mut self.purchase_date_filter),
            ("productPurchased", &mut self.product_filter),
            ("price", &mut self.price_filter),
            ("rewardPoints", &mut self.reward_points_filter),
            ("name", &mut self.name_filter),
            ("month", &mut self.month_filter),
            ("year", &mut self.year_filter),
            ("points", &mut self.points_filter),
            ("totalPoints", &mut self.total_points_filter),
        ]
    }

    /// Rewrite the query into its canonical form.
    ///
    /// Defaults are made explicit for the dataset and the tab, while
    /// everything else is omitted when it matches its default: blank text is
    /// dropped, dates that do not parse are dropped, sort fields that do not
    /// belong to the active tab are dropped, page 1 and the default page size
    /// are dropped, and column filters for other tabs are dropped.
    ///
    /// Canonical queries are a fixed point of this function, which is what
    /// makes redirecting to the canonical URL safe.
    pub(crate) fn canonicalized(mut self, default_dataset: &str) -> Self {
        self.dataset =
            normalize_text(self.dataset).or_else(|| Some(default_dataset.to_owned()));
        let tab = self.active_tab();
        self.tab = Some(tab);

        self.name = normalize_text(self.name);
        self.from = normalize_date(self.from);
        self.to = normalize_date(self.to);

        self.sort = self
            .sort
            .filter(|field| tab.filter_fields().contains(&field.as_str()));
        self.dir = self.sort.as_ref().map(|_| self.dir.unwrap_or_default());

        self.page = self.page.filter(|page| *page > 1);
        self.per_page = self.per_page.filter(|per_page| {
            PER_PAGE_OPTIONS.contains(per_page) && *per_page != DEFAULT_PER_PAGE
        });

        for (field, slot) in self.filter_slots() {
            *slot = if tab.filter_fields().contains(&field) {
                normalize_text(slot.take())
            } else {
                None
            };
        }

        self
    }

    /// The query for another tab, with the table state reset but the filter
    /// bar kept.
    pub(crate) fn with_tab(&self, tab: Tab) -> Self {
        Self {
            dataset: self.dataset.clone(),
            tab: Some(tab),
            name: self.name.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            ..Self::default()
        }
    }

    /// The query for another page of the same table.
    pub(crate) fn with_page(&self, page: usize) -> Self {
        let mut query = self.clone();
        query.page = (page > 1).then_some(page);
        query
    }

    /// The query sorted by the given column.
    ///
    /// Clicking the column that is already sorted flips the direction,
    /// clicking any other column starts an ascending sort.
    pub(crate) fn with_sort(&self, field: &str) -> Self {
        let mut query = self.clone();
        if query.sort.as_deref() == Some(field) {
            query.dir = Some(query.dir.unwrap_or_default().toggled());
        } else {
            query.sort = Some(field.to_owned());
            query.dir = Some(SortDirection::Asc);
        }
        query
    }

    /// The URL that table inputs send their requests to.
    ///
    /// Only the dataset and the tab are baked into the URL. Sort, direction,
    /// page size, and every filter travel as form values instead, and the
    /// page resets to 1 whenever an input changes.
    pub(crate) fn input_url(&self, route: &str) -> String {
        Self {
            dataset: self.dataset.clone(),
            tab: Some(self.active_tab()),
            ..Self::default()
        }
        .to_url(route)
    }

    /// Encode the query as a URL query string.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_else(|error| {
            tracing::error!("could not encode dashboard query: {error}");
            String::new()
        })
    }

    /// Encode the query as a full URL for the given route.
    pub fn to_url(&self, route: &str) -> String {
        format!("{route}?{}", self.to_query_string())
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn normalize_date(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .and_then(parse_purchase_date)
        .map(|date| date.to_string())
}

#[cfg(test)]
mod tests {
    use crate::table::SortDirection;

    use super::{DashboardQuery, Tab};

    fn canonical_query() -> DashboardQuery {
        DashboardQuery {
            dataset: Some("retail.json".to_owned()),
            tab: Some(Tab::Transactions),
            ..Default::default()
        }
    }

    #[test]
    fn canonicalized_fills_missing_dataset_and_tab() {
        let got = DashboardQuery::default().canonicalized("retail.json");

        assert_eq!(got, canonical_query());
    }

    #[test]
    fn canonicalized_is_a_fixed_point() {
        let query = DashboardQuery {
            name: Some("Alice".to_owned()),
            from: Some("2024-01-01".to_owned()),
            sort: Some("price".to_owned()),
            dir: Some(SortDirection::Desc),
            page: Some(3),
            per_page: Some(25),
            price_filter: Some("120".to_owned()),
            ..canonical_query()
        };

        let got = query.clone().canonicalized("other.json");

        assert_eq!(got, query);
    }

    #[test]
    fn canonicalized_drops_blank_text_and_bad_dates() {
        let query = DashboardQuery {
            name: Some("   ".to_owned()),
            from: Some("not-a-date".to_owned()),
            to: Some("2024-02-30".to_owned()),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got, canonical_query());
    }

    #[test]
    fn canonicalized_drops_sort_fields_from_other_tabs() {
        let query = DashboardQuery {
            tab: Some(Tab::TotalRewards),
            sort: Some("price".to_owned()),
            dir: Some(SortDirection::Desc),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got.sort, None);
        assert_eq!(got.dir, None);
    }

    #[test]
    fn canonicalized_fills_direction_for_a_valid_sort() {
        let query = DashboardQuery {
            sort: Some("price".to_owned()),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got.dir, Some(SortDirection::Asc));
    }

    #[test]
    fn canonicalized_drops_default_page_and_page_size() {
        let query = DashboardQuery {
            page: Some(1),
            per_page: Some(10),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got.page, None);
        assert_eq!(got.per_page, None);
    }

    #[test]
    fn canonicalized_drops_page_sizes_that_are_not_offered() {
        let query = DashboardQuery {
            per_page: Some(7),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got.per_page, None);
    }

    #[test]
    fn canonicalized_drops_filters_from_other_tabs() {
        let query = DashboardQuery {
            tab: Some(Tab::MonthlyRewards),
            price_filter: Some("120".to_owned()),
            month_filter: Some("  January ".to_owned()),
            ..canonical_query()
        };

        let got = query.canonicalized("retail.json");

        assert_eq!(got.price_filter, None);
        assert_eq!(got.month_filter.as_deref(), Some("January"));
    }

    #[test]
    fn with_tab_resets_the_table_but_keeps_the_filter_bar() {
        let query = DashboardQuery {
            name: Some("Alice".to_owned()),
            from: Some("2024-01-01".to_owned()),
            sort: Some("price".to_owned()),
            dir: Some(SortDirection::Desc),
            page: Some(3),
            per_page: Some(25),
            price_filter: Some("120".to_owned()),
            ..canonical_query()
        };

        let got = query.with_tab(Tab::MonthlyRewards);

        assert_eq!(got.tab, Some(Tab::MonthlyRewards));
        assert_eq!(got.dataset.as_deref(), Some("retail.json"));
        assert_eq!(got.name.as_deref(), Some("Alice"));
        assert_eq!(got.from.as_deref(), Some("2024-01-01"));
        assert_eq!(got.sort, None);
        assert_eq!(got.page, None);
        assert_eq!(got.per_page, None);
        assert_eq!(got.price_filter, None);
    }

    #[test]
    fn with_sort_toggles_direction_on_the_same_column() {
        let query = canonical_query().with_sort("price");
        assert_eq!(query.sort.as_deref(), Some("price"));
        assert_eq!(query.dir, Some(SortDirection::Asc));

        let query = query.with_sort("price");
        assert_eq!(query.dir, Some(SortDirection::Desc));

        let query = query.with_sort("customerName");
        assert_eq!(query.sort.as_deref(), Some("customerName"));
        assert_eq!(query.dir, Some(SortDirection::Asc));
    }

    #[test]
    fn with_page_omits_the_first_page() {
        assert_eq!(canonical_query().with_page(1).page, None);
        assert_eq!(canonical_query().with_page(4).page, Some(4));
    }

    #[test]
    fn query_string_omits_unset_fields() {
        let query = canonical_query();

        assert_eq!(query.to_query_string(), "dataset=retail.json&tab=transactions");
    }

    #[test]
    fn query_string_round_trips() {
        let query = DashboardQuery {
            name: Some("Alice Smith".to_owned()),
            sort: Some("rewardPoints".to_owned()),
            dir: Some(SortDirection::Desc),
            page: Some(2),
            per_page: Some(5),
            reward_points_filter: Some("50".to_owned()),
            ..canonical_query()
        };

        let encoded = query.to_query_string();
        let decoded: DashboardQuery = serde_html_form::from_str(&encoded)
            .expect("canonical query strings should deserialize");

        assert_eq!(decoded, query);
    }

    #[test]
    fn column_filters_use_the_f_prefix() {
        let decoded: DashboardQuery =
            serde_html_form::from_str("f.customerId=7&f.totalPoints=115")
                .expect("filter params should deserialize");

        assert_eq!(decoded.customer_id_filter.as_deref(), Some("7"));
        assert_eq!(decoded.total_points_filter.as_deref(), Some("115"));
    }

    #[test]
    fn input_url_only_carries_dataset_and_tab() {
        let query = DashboardQuery {
            sort: Some("price".to_owned()),
            dir: Some(SortDirection::Desc),
            page: Some(3),
            price_filter: Some("120".to_owned()),
            ..canonical_query()
        };

        let got = query.input_url("/dashboard/transactions");

        assert_eq!(got, "/dashboard/transactions?dataset=retail.json&tab=transactions");
    }
}
