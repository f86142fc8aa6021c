pub mod u501_drug_import;
