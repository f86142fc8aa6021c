pub mod p900_payables;
pub mod p901_receivables;
pub mod p902_low_stock;
pub mod p903_expiring_stock;
pub mod p904_drug_catalogue;
pub mod p905_purchase_invoices;
pub mod p906_pos_sales;
pub mod p907_associates;
