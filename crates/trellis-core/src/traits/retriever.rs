use std::future::Future;
use std::sync::Arc;

use crate::errors::RetrievalError;
use crate::models::{Query, RetrievalResult};

/// The full pipeline behind one call. Front ends are written against this.
pub trait IRetriever: Send + Sync {
    fn retrieve(&self, query: &Query) -> impl Future<Output = Result<RetrievalResult, RetrievalError>> + Send;
}

impl<T: IRetriever> IRetriever for Arc<T> {
    fn retrieve(&self, query: &Query) -> impl Future<Output = Result<RetrievalResult, RetrievalError>> + Send {
        (**self).retrieve(query)
    }
}
