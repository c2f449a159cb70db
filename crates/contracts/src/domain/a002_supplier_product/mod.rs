pub mod aggregate;

pub use aggregate::{SupplierProduct, SupplierProductId};
