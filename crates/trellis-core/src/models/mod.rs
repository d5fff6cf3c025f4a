//! Request-scoped data model. Persisted entities belong to the external
//! store; these are transient copies fetched through the ports.

mod corpus;
mod embedding_vector;
mod entities;
mod expansion_context;
mod query;
mod retrieval_result;
mod search_hit;
mod stage;

pub use corpus::Corpus;
pub use embedding_vector::EmbeddingVector;
pub use entities::{Author, AuthorRef, Document, DocumentRef, Fragment, FragmentRef};
pub use expansion_context::{ExpansionContext, Relation};
pub use query::Query;
pub use retrieval_result::{FragmentContext, RetrievalResult, RetrievedFragment};
pub use search_hit::{SearchHit, SearchOutcome};
pub use stage::PipelineStage;
