//! Alert system for displaying success and error messages to users.

use maud::{Markup, html};

/// An alert message with styling based on the outcome it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::SuccessSimple { message } => (true, message, String::new()),
            Alert::Error { message, details } => (false, message, details),
            Alert::ErrorSimple { message } => (false, message, String::new()),
        };

        let container_style = if is_success {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };
        let role = if is_success { "status" } else { "alert" };
        let kind = if is_success { "success" } else { "error" };

        html! {
            div class=(container_style) role=(role) data-alert=(kind)
            {
                div class="flex-1"
                {
                    span class="alert-message font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="alert-details mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold"
                    onclick="this.parentElement.remove()"
                {
                    "×"
                }
            }
        }
    }
}
