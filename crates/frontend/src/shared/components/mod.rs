pub mod filter_panel;
pub mod stat_card;
pub mod table_totals_row;

pub use filter_panel::{FilterPanel, FilterTag};
pub use stat_card::{StatCard, StatFormat, StatStatus};
pub use table_totals_row::TableTotalsRow;
