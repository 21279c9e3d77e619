pub mod base;
pub mod item;

pub use base::{BaseModel, SoftDelete, Timestamped};
pub use item::{Entity as Item, Model as ItemModel};
