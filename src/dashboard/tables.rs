//! Column definitions and table rendering for the dashboard tabs.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    pagination::{PER_PAGE_OPTIONS, PageIndicator, page_indicators},
    rewards::{MonthlyReward, TotalReward},
    table::{CellValue, Column, SortDirection, TablePage},
    transaction::Transaction,
};

use super::query::DashboardQuery;

/// The max number of graphemes to display in a table cell before truncating
/// and displaying ellipses. The full text stays available as a tooltip and
/// for filtering.
const MAX_CELL_GRAPHEMES: usize = 32;

/// The columns of the enriched transactions table.
pub(crate) fn transaction_columns() -> Vec<Column<Transaction>> {
    vec![
        Column {
            field: "transactionId",
            label: "Transaction ID",
            value: |row| CellValue::Integer(row.transaction_id as i64),
        },
        Column {
            field: "customerId",
            label: "Customer ID",
            value: |row| CellValue::Integer(row.customer_id as i64),
        },
        Column {
            field: "customerName",
            label: "Customer Name",
            value: |row| CellValue::Text(row.customer_name.clone()),
        },
        Column {
            field: "purchaseDate",
            label: "Purchase Date",
            value: |row| CellValue::Date(row.purchase_date),
        },
        Column {
            field: "productPurchased",
            label: "Product",
            value: |row| CellValue::Text(row.product_purchased.clone()),
        },
        Column {
            field: "price",
            label: "Price",
            value: |row| CellValue::Money(row.price),
        },
        Column {
            field: "rewardPoints",
            label: "Reward Points",
            value: |row| CellValue::Integer(row.reward_points as i64),
        },
    ]
}

/// The columns of the monthly rewards table.
///
/// The month column holds the English month name, so it filters and sorts as
/// text.
pub(crate) fn monthly_columns() -> Vec<Column<MonthlyReward>> {
    vec![
        Column {
            field: "customerId",
            label: "Customer ID",
            value: |row| CellValue::Integer(row.customer_id as i64),
        },
        Column {
            field: "name",
            label: "Name",
            value: |row| CellValue::Text(row.name.clone()),
        },
        Column {
            field: "month",
            label: "Month",
            value: |row| CellValue::Text(row.month.to_string()),
        },
        Column {
            field: "year",
            label: "Year",
            value: |row| CellValue::Integer(row.year as i64),
        },
        Column {
            field: "points",
            label: "Reward Points",
            value: |row| CellValue::Integer(row.points as i64),
        },
    ]
}

/// The columns of the total rewards table.
pub(crate) fn total_columns() -> Vec<Column<TotalReward>> {
    vec![
        Column {
            field: "name",
            label: "Customer Name",
            value: |row| CellValue::Text(row.name.clone()),
        },
        Column {
            field: "totalPoints",
            label: "Total Reward Points",
            value: |row| CellValue::Integer(row.total_points as i64),
        },
    ]
}

/// Render the active tab's table with its filter row, sort headers, and
/// pagination controls.
///
/// This is the fragment the table partial routes return and what the page
/// handler places inside `#tab-panel`. The hidden sort and direction inputs
/// let every input request carry the current sort without baking it into
/// request URLs.
pub(crate) fn tab_panel_content<R>(
    columns: &[Column<R>],
    page: &TablePage<R>,
    query: &DashboardQuery,
) -> Markup {
    let input_url = query.input_url(query.active_tab().partial_route());

    html! {
        @if let Some((field, direction)) = query.sort_for_table() {
            input type="hidden" name="sort" value=(field);
            input type="hidden" name="dir" value=(direction.as_query_value());
        }

        div class="relative overflow-x-auto rounded bg-gray-50 dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in columns {
                            (sort_header(column, query))
                        }
                    }

                    tr
                    {
                        @for column in columns {
                            (filter_cell(column, query, &input_url))
                        }
                    }
                }

                tbody
                {
                    @if page.rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan=(columns.len())
                                data-empty-state="true"
                                class="px-6 py-8 text-center"
                            {
                                "No data available."
                            }
                        }
                    } @else {
                        @for row in &page.rows {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                @for column in columns {
                                    (data_cell(&(column.value)(row)))
                                }
                            }
                        }
                    }
                }
            }
        }

        (table_footer(page, query, &input_url))
    }
}

fn sort_header<R>(column: &Column<R>, query: &DashboardQuery) -> Markup {
    let href = query
        .with_sort(column.field)
        .to_url(endpoints::DASHBOARD_VIEW);
    let indicator = match query.sort_for_table() {
        Some((field, SortDirection::Asc)) if field == column.field => Some("▲"),
        Some((field, SortDirection::Desc)) if field == column.field => Some("▼"),
        _ => None,
    };

    html! {
        th scope="col" class=(TABLE_CELL_STYLE) data-sort-field=(column.field)
        {
            a href=(href) class="inline-flex items-center gap-1 hover:underline"
            {
                (column.label)

                @if let Some(indicator) = indicator {
                    span aria-hidden="true" { (indicator) }
                }
            }
        }
    }
}

fn filter_cell<R>(column: &Column<R>, query: &DashboardQuery, input_url: &str) -> Markup {
    html! {
        th scope="col" class="px-6 pb-3 font-normal"
        {
            input
                type="search"
                name=(format!("f.{}", column.field))
                value=[query.filter_value(column.field)]
                placeholder="Filter"
                aria-label=(format!("Filter by {}", column.label))
                class="block w-full p-2 rounded text-sm font-normal normal-case \
                    bg-white border border-gray-300 text-gray-900 \
                    dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                hx-get=(input_url)
                hx-trigger="keyup changed delay:500ms, search";
        }
    }
}

fn data_cell(value: &CellValue) -> Markup {
    let full = value.render();
    let truncate_at = full
        .grapheme_indices(true)
        .nth(MAX_CELL_GRAPHEMES)
        .map(|(offset, _)| offset);

    match truncate_at {
        Some(offset) => {
            let short = format!("{}...", &full[..offset]);
            html! {
                td class=(TABLE_CELL_STYLE) title=(full) { (short) }
            }
        }
        None => html! {
            td class=(TABLE_CELL_STYLE) { (full) }
        },
    }
}

fn table_footer<R>(page: &TablePage<R>, query: &DashboardQuery, input_url: &str) -> Markup {
    html! {
        nav
            class="pagination flex items-center flex-wrap justify-between gap-4 px-2 py-3"
            aria-label="Table navigation"
        {
            label class="flex items-center gap-2 text-sm text-gray-600 dark:text-gray-300"
            {
                "Rows per page"

                select
                    name="perPage"
                    class="p-2 rounded text-sm bg-white border border-gray-300 text-gray-900 \
                        dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                    hx-get=(input_url)
                    hx-trigger="change"
                {
                    @for option in PER_PAGE_OPTIONS {
                        option value=(option) selected[option == page.per_page] { (option) }
                    }
                }
            }

            span class="text-sm text-gray-600 dark:text-gray-300"
            {
                "Page " (page.page) " of " (page.page_count)
                " (" (page.filtered_count) " rows)"
            }

            ul class="pagination inline-flex items-center -space-x-px text-sm"
            {
                @for indicator in page_indicators(page.page, page.page_count) {
                    li
                    {
                        @match indicator {
                            PageIndicator::Back(to_page) => {
                                a
                                    href=(query.with_page(to_page).to_url(endpoints::DASHBOARD_VIEW))
                                    role="button"
                                    class="block px-3 py-2 text-blue-600 hover:underline"
                                { "Back" }
                            }
                            PageIndicator::Next(to_page) => {
                                a
                                    href=(query.with_page(to_page).to_url(endpoints::DASHBOARD_VIEW))
                                    role="button"
                                    class="block px-3 py-2 text-blue-600 hover:underline"
                                { "Next" }
                            }
                            PageIndicator::Page(to_page) => {
                                a
                                    href=(query.with_page(to_page).to_url(endpoints::DASHBOARD_VIEW))
                                    class="block px-3 py-2 text-blue-600 hover:underline"
                                { (to_page) }
                            }
                            PageIndicator::CurrentPage(current) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 font-bold text-black dark:text-white"
                                { (current) }
                            }
                            PageIndicator::Ellipsis => {
                                span class="block px-3 py-2 text-gray-400" { "..." }
                            }
                        }
                    }
                }
            }
        }
    }
}
