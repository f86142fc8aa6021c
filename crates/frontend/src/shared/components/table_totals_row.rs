use leptos::prelude::*;
use reports::{ReportSpec, SummaryTotals};

/// Totals row under a report table.
///
/// Each totalled column shows its sum under the column, formatted like the
/// cells above it; the record count takes the first cell without a sum.
#[component]
pub fn TableTotalsRow(
    spec: ReportSpec,
    #[prop(into)]
    totals: Signal<SummaryTotals>,
    /// Extra trailing cells (row actions column)
    #[prop(optional)]
    trailing: usize,
) -> impl IntoView {
    let cells = move || {
        let totals = totals.get();
        let mut cells = spec.total_cells(&totals, &format!("Records: {}", totals.count));
        cells.resize(cells.len() + trailing, String::new());
        cells
    };

    view! {
        <tr class="table__totals-row">
            {move || {
                cells()
                    .into_iter()
                    .map(|text| view! { <td class="table__cell--right">{text}</td> })
                    .collect_view()
            }}
        </tr>
    }
}
