use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, link,
        loading_spinner,
    },
};

fn upload_form_view() -> Markup {
    let upload_route = endpoints::DATASETS_API;
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(upload_route)
            enctype="multipart/form-data"
            hx-disabled-elt="#files, #submit-button"
            hx-indicator="#indicator"
            hx-swap="innerHTML"
            hx-target="#import-result"
            hx-target-error="#import-result"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="files"
                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Choose file(s) to upload"
                }

                input
                    id="files"
                    type="file"
                    name="files"
                    accept=".json,.csv,application/json,text/csv"
                    placeholder="files"
                    multiple
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p
                {
                    "Upload JSON or CSV files of transaction records. Each file \
                    becomes a dataset you can pick on the dashboard."
                }
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Upload Files"
            }
        }
    }
}

fn import_view() -> Markup {
    let form = upload_form_view();

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end mb-6"
            {
                h1 class="text-xl font-bold" { "Import Datasets" }

                (link(endpoints::DASHBOARD_VIEW, "Back to dashboard"))
            }

            div class="max-w-xl"
            {
                (form)

                div id="import-result" class="mt-6" {}
            }
        }
    };

    base("Import Datasets", &content)
}

/// Route handler for the dataset import page.
pub async fn get_import_page() -> Response {
    import_view().into_response()
}
