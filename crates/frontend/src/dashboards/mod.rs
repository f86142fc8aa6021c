pub mod d400_store_summary;

pub use d400_store_summary::ui::StoreSummaryDashboard;
