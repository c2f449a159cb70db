pub mod u501_place_orders;
pub mod u502_send_to_store;
pub mod u503_sync_products;
pub mod u504_catalog_import;
