pub mod u504_catalog_import;
