pub mod common;

pub mod a001_store;
pub mod a002_supplier_product;
pub mod a003_drop_order;
