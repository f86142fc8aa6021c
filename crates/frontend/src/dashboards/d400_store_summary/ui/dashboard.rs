use contracts::dashboards::d400_store_summary::{DailySales, StoreSummaryResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::super::{api, PAGE_ID};
use crate::layout::global_context::AppGlobalContext;
use crate::projections::{p900_payables, p901_receivables, p902_low_stock, p903_expiring_stock, p906_pos_sales};
use crate::shared::api_utils::abort_on_cleanup;
use crate::shared::components::{StatCard, StatFormat, StatStatus};
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

fn warn_if_positive(value: Option<f64>) -> StatStatus {
    match value {
        Some(v) if v > 0.0 => StatStatus::Warning,
        Some(_) => StatStatus::Good,
        None => StatStatus::Neutral,
    }
}

/// Bar widths in percent of the busiest day
fn trend_bars(trend: &[DailySales]) -> Vec<(String, f64, f64)> {
    let peak = trend.iter().map(|d| d.amount).fold(0.0_f64, f64::max);
    trend
        .iter()
        .map(|d| {
            let width = if peak > 0.0 { d.amount / peak * 100.0 } else { 0.0 };
            (d.date.clone(), d.amount, width)
        })
        .collect()
}

#[component]
pub fn StoreSummaryDashboard() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let currency = config().export.currency;
    let abort = StoredValue::new_local(abort_on_cleanup());

    let data = RwSignal::new(None::<StoreSummaryResponse>);
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        is_loading.set(true);
        error.set(None);
        let signal = abort.get_value();
        spawn_local(async move {
            match api::fetch_store_summary(signal).await {
                Ok(summary) => data.set(Some(summary)),
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::warn!("{}: {}", PAGE_ID, e);
                    error.set(Some(e.to_string()));
                }
            }
            is_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let field = move |pick: fn(&StoreSummaryResponse) -> Option<f64>| {
        Signal::derive(move || data.with(|d| d.as_ref().and_then(pick)))
    };
    let today_sales = field(|s| s.today_sales);
    let payables = field(|s| s.payables_due);
    let receivables = field(|s| s.receivables_due);
    let low_stock = field(|s| s.low_stock_count.map(|n| n as f64));
    let expiring = field(|s| s.expiring_count.map(|n| n as f64));

    let bills = Signal::derive(move || {
        data.with(|d| d.as_ref().and_then(|s| s.today_bills).map(|n| format!("{} bills", n)))
    });
    let open = move |key: &'static str| Callback::new(move |_| ctx.open_page(key));

    let trend_currency = currency.clone();
    let trend = move || {
        let Some(summary) = data.get() else {
            return ().into_any();
        };
        if summary.sales_trend.is_empty() {
            return ().into_any();
        }
        let week = reports::format_currency(summary.week_total(), &trend_currency);
        let bars = trend_bars(&summary.sales_trend)
            .into_iter()
            .map(|(date, amount, width)| {
                let amount = reports::format_currency(amount, &trend_currency);
                view! {
                    <div class="trend__row">
                        <span class="trend__date">{date}</span>
                        <div class="trend__track">
                            <div class="trend__bar" style:width=format!("{:.1}%", width)></div>
                        </div>
                        <span class="trend__amount">{amount}</span>
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="dashboard__trend">
                <div class="dashboard__section-title">
                    {icon("calendar")}
                    <span>"Last 7 days"</span>
                    <Badge>{week}</Badge>
                </div>
                {bars}
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id=format!("{}--{}", PAGE_ID, PAGE_CAT_DASHBOARD) category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <h1 class="page__title">"Dashboard"</h1>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| load()
                    disabled=Signal::derive(move || is_loading.get())
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Show when=move || is_loading.get() && data.with(Option::is_none)>
                <Spinner label="Loading..." />
            </Show>

            <div class="dashboard__cards">
                <StatCard
                    label="Today's Sales"
                    icon_name="shopping-cart"
                    value=today_sales
                    format=StatFormat::Money
                    currency=currency.clone()
                    subtitle=bills
                    on_open=open(p906_pos_sales::PAGE_ID)
                />
                <StatCard
                    label="Payables Due"
                    icon_name="wallet"
                    value=payables
                    format=StatFormat::Money
                    currency=currency.clone()
                    status=Signal::derive(move || warn_if_positive(payables.get()))
                    on_open=open(p900_payables::PAGE_ID)
                />
                <StatCard
                    label="Receivables Due"
                    icon_name="receipt"
                    value=receivables
                    format=StatFormat::Money
                    currency=currency.clone()
                    on_open=open(p901_receivables::PAGE_ID)
                />
                <StatCard
                    label="Low Stock Items"
                    icon_name="package"
                    value=low_stock
                    format=StatFormat::Integer
                    currency=currency.clone()
                    status=Signal::derive(move || warn_if_positive(low_stock.get()))
                    on_open=open(p902_low_stock::PAGE_ID)
                />
                <StatCard
                    label="Expiring Soon"
                    icon_name="alert-triangle"
                    value=expiring
                    format=StatFormat::Integer
                    currency=currency.clone()
                    status=Signal::derive(move || warn_if_positive(expiring.get()))
                    on_open=open(p903_expiring_stock::PAGE_ID)
                />
            </div>

            {trend}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, amount: f64) -> DailySales {
        DailySales { date: date.into(), amount }
    }

    #[test]
    fn test_trend_bars_scale_to_peak() {
        let bars = trend_bars(&[day("01-04", 50.0), day("02-04", 200.0), day("03-04", 0.0)]);
        let widths: Vec<f64> = bars.iter().map(|b| b.2).collect();
        assert_eq!(widths, vec![25.0, 100.0, 0.0]);
    }

    #[test]
    fn test_trend_bars_all_zero() {
        let bars = trend_bars(&[day("01-04", 0.0)]);
        assert_eq!(bars[0].2, 0.0);
    }

    #[test]
    fn test_warning_status() {
        assert_eq!(warn_if_positive(Some(3.0)), StatStatus::Warning);
        assert_eq!(warn_if_positive(Some(0.0)), StatStatus::Good);
        assert_eq!(warn_if_positive(None), StatStatus::Neutral);
    }
}
