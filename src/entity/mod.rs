pub mod order_items;
pub mod order_sequences;
pub mod orders;
pub mod store_activity;
pub mod stores;
pub mod users;

pub use order_items::Entity as OrderItems;
pub use order_sequences::Entity as OrderSequences;
pub use orders::Entity as Orders;
pub use store_activity::Entity as StoreActivity;
pub use stores::Entity as Stores;
pub use users::Entity as Users;
