//! HTML rendering for the dashboard page frame.
//!
//! The frame holds the dataset selector, the filter bar, the tab bar, and
//! the `#tab-panel` element the table fragments swap into. Table rendering
//! itself lives in [super::tables].

use maud::{Markup, html};

use crate::{
    assistant::assistant_panel,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base, link,
    },
};

use super::query::{DashboardQuery, Tab};

/// Render the full dashboard page around an already-rendered tab panel.
pub(crate) fn dashboard_view(datasets: &[String], query: &DashboardQuery, panel: Markup) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end mb-6"
            {
                h1 class="text-xl font-bold" { "Customer Rewards Dashboard" }

                a href=(endpoints::IMPORT_VIEW) class=(LINK_STYLE)
                {
                    "Import Datasets"
                }
            }

            (dataset_selector(datasets, query))

            form
                id="dashboard-controls"
                hx-target="#tab-panel"
                hx-target-error="#tab-panel"
                hx-swap="innerHTML"
                hx-include="#dashboard-controls"
                hx-indicator="#panel-indicator"
            {
                (filter_bar(query))

                (tab_bar(query))

                div id="tab-panel"
                {
                    (panel)
                }
            }

            (assistant_panel(query.dataset_name()))
        }
    };

    base("Dashboard", &content)
}

/// Render the dashboard page when the catalog has no datasets at all.
pub(crate) fn dashboard_no_data_view() -> Markup {
    let import_link = link(endpoints::IMPORT_VIEW, "importing");

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-col items-center px-6 py-8 mx-auto"
            {
                h2 class="text-xl font-bold"
                {
                    "Nothing here yet..."
                }

                p
                {
                    "Reward tables will show up here once there is a
                    transactions dataset to read. You can add one
                    by " (import_link) " a JSON or CSV file."
                }
            }
        }
    );

    base("Dashboard", &content)
}

fn dataset_selector(datasets: &[String], query: &DashboardQuery) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex items-end gap-3 mb-6"
        {
            input type="hidden" name="tab" value=(query.active_tab().as_query_value());

            div class="grow max-w-xs"
            {
                label for="dataset-select" class=(FORM_LABEL_STYLE) { "Dataset" }

                select
                    id="dataset-select"
                    name="dataset"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for dataset in datasets {
                        option value=(dataset) selected[dataset == query.dataset_name()]
                        {
                            (dataset)
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Load" }
        }
    }
}

fn filter_bar(query: &DashboardQuery) -> Markup {
    let input_url = query.input_url(query.active_tab().partial_route());

    html! {
        div id="filter-bar" class="grid gap-4 md:grid-cols-3 mb-6"
        {
            div
            {
                label for="filter-name" class=(FORM_LABEL_STYLE) { "Customer Name" }

                input
                    id="filter-name"
                    type="search"
                    name="name"
                    value=[query.name_search()]
                    placeholder="Search by customer name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(input_url)
                    hx-trigger="keyup changed delay:500ms, search";
            }

            div
            {
                label for="filter-from" class=(FORM_LABEL_STYLE) { "From" }

                input
                    id="filter-from"
                    type="date"
                    name="from"
                    value=[query.from.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(input_url)
                    hx-trigger="change";
            }

            div
            {
                label for="filter-to" class=(FORM_LABEL_STYLE) { "To" }

                input
                    id="filter-to"
                    type="date"
                    name="to"
                    value=[query.to.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(input_url)
                    hx-trigger="change";
            }
        }
    }
}

fn tab_bar(query: &DashboardQuery) -> Markup {
    html! {
        div class="flex items-center justify-between border-b border-gray-200 dark:border-gray-700 mb-4"
        {
            nav class="flex flex-wrap -mb-px text-sm font-medium text-center" aria-label="Dashboard tabs"
            {
                @for tab in Tab::ALL {
                    @if tab == query.active_tab() {
                        span
                            aria-current="page"
                            class="inline-block p-4 text-blue-600 border-b-2 \
                                border-blue-600 rounded-t-lg dark:text-blue-500 \
                                dark:border-blue-500"
                        {
                            (tab.label())
                        }
                    } @else {
                        a
                            href=(query.with_tab(tab).to_url(endpoints::DASHBOARD_VIEW))
                            class="inline-block p-4 border-b-2 border-transparent \
                                rounded-t-lg hover:text-gray-600 hover:border-gray-300 \
                                dark:hover:text-gray-300"
                        {
                            (tab.label())
                        }
                    }
                }
            }

            span
                id="panel-indicator"
                class="htmx-indicator text-sm text-gray-500 dark:text-gray-400 px-4"
            {
                "Loading..."
            }
        }
    }
}
