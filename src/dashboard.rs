//! The dashboard lists the recorded transactions with income and expense totals.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::FinanceApi,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub finance_api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            finance_api: state.finance_api.clone(),
        }
    }
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    income: f64,
    expenses: f64,
}

impl Totals {
    fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Totals::default(), |mut totals, transaction| {
                match transaction.transaction_type {
                    TransactionType::Income => totals.income += transaction.amount,
                    TransactionType::Expense => totals.expenses += transaction.amount,
                }
                totals
            })
    }

    fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Display a page with the recorded transactions, newest first.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let mut transactions = match state.finance_api.list_transactions().await {
        Ok(transactions) => transactions,
        Err(error) => return Error::from(error).into_response(),
    };

    // Stable sort keeps the API's order for transactions on the same day.
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    dashboard_view(&transactions).into_response()
}

fn dashboard_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let totals = Totals::from_transactions(transactions);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Dashboard" }

                (totals_view(&totals))

                @if transactions.is_empty() {
                    div id="no-transactions" class="text-center space-y-4"
                    {
                        p { "No transactions yet." }

                        a
                            href=(endpoints::NEW_TRANSACTION_VIEW)
                            class={"inline-block " (BUTTON_PRIMARY_STYLE)}
                        {
                            "Add a transaction"
                        }
                    }
                } @else {
                    (transactions_table(transactions))
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}

fn totals_view(totals: &Totals) -> Markup {
    let net_style = if totals.net() >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    };

    html! {
        dl id="totals" class="grid grid-cols-3 gap-4 text-center"
        {
            div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                dt class="text-sm" { "Income" }
                dd id="total-income" class={"text-xl font-bold " (TABLE_CELL_GREEN_STYLE)}
                {
                    (format_currency(totals.income))
                }
            }

            div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                dt class="text-sm" { "Expenses" }
                dd id="total-expenses" class={"text-xl font-bold " (TABLE_CELL_RED_STYLE)}
                {
                    (format_currency(totals.expenses))
                }
            }

            div class="p-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                dt class="text-sm" { "Net" }
                dd id="total-net" class={"text-xl font-bold " (net_style)}
                {
                    (format_currency(totals.net()))
                }
            }
        }
    }
}

fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table id="transactions" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        @let amount_style = match transaction.transaction_type {
                            TransactionType::Income => TABLE_CELL_GREEN_STYLE,
                            TransactionType::Expense => TABLE_CELL_RED_STYLE,
                        };

                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class={(TABLE_CELL_STYLE) " text-right " (amount_style)}
                            {
                                (format_currency(transaction.amount))
                            }
                        }
                    }
                }
            }
        }
    }
}
