//! Record schemas for the collection services.
//! - One struct per collection shape, serde-derived end to end.
//! - Every field except the id is `Option`: an absent JSON key is stored
//!   as `None` and omitted again on output.

pub mod product;
pub mod store_item;
pub mod student;

#[cfg(test)]
mod tests;

pub use product::Product;
pub use store_item::{Rating, StoreItem};
pub use student::Student;

/// A record addressable by its collection-unique integer id.
pub trait Keyed {
    /// The id assigned when the record entered its collection. Never
    /// reassigned afterwards, including on full replacement.
    fn id(&self) -> u64;
}
