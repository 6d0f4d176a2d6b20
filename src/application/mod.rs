pub mod inference;
pub mod loader;
pub mod schema;

pub use inference::TypeInferencer;
pub use loader::{DatasetLoader, LoadSession, LoadTicket};
pub use schema::SchemaAssembler;
