pub mod material;
pub mod order;

pub use material::{Material, MaterialsPage};
pub use order::{LineItem, Order, OrderStatus, OrdersPage, PartGeometry, PriceRate};
