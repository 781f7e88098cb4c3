mod cart_item;
mod town;

pub use cart_item::CartItem;
pub use town::Town;
