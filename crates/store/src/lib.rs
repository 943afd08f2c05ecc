pub mod error;
pub mod memory;
pub mod objects;
pub mod postgres;
pub mod query;
pub mod record;
pub mod session;
pub mod store;

pub use common::{Money, OrderId, OrderStatus, ProductId, ReviewId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use objects::{InMemoryObjectStore, ObjectStore, StoredObject};
pub use postgres::PostgresStore;
pub use query::{Direction, ProductColumn, ProductQuery};
pub use record::{
    NewOrder, NewProduct, NewReview, Order, Product, ProductPatch, Review, Specifications,
};
pub use session::{InMemorySessionStore, Session, SessionStore};
pub use store::{Store, StoreExt};
