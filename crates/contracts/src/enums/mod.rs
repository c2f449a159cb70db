pub mod order_status;
pub mod store_type;
