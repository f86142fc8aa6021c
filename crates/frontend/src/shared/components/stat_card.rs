use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    Money,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatStatus {
    #[default]
    Neutral,
    Good,
    Warning,
}

pub fn format_stat(value: Option<f64>, format: StatFormat, currency: &str) -> String {
    match (value, format) {
        (None, _) => "—".to_string(),
        (Some(v), StatFormat::Money) => reports::format_currency(v, currency),
        (Some(v), StatFormat::Integer) => format!("{}", v.round() as i64),
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Primary value (None = not loaded or not reported)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: StatFormat,
    #[prop(into)]
    currency: String,
    #[prop(into, optional)]
    status: Signal<StatStatus>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
    /// Opens the detail report when clicked
    #[prop(optional)]
    on_open: Option<Callback<()>>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        StatStatus::Good => "stat-card stat-card--success",
        StatStatus::Warning => "stat-card stat-card--warning",
        StatStatus::Neutral => "stat-card",
    };

    let formatted = move || format_stat(value.get(), format, &currency);

    view! {
        <div
            class=status_class
            class:stat-card--clickable=on_open.is_some()
            on:click=move |_| {
                if let Some(cb) = on_open {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
