//! Domain entity types.

mod types;

pub use types::{Family, FamilyId, ItemId, ShoppingList, Todo, User, UserId};
