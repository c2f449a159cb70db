pub mod aggregate;

pub use aggregate::{DropOrder, DropOrderId};
