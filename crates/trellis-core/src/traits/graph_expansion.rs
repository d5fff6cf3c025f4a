use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use crate::errors::ExpansionError;
use crate::models::ExpansionContext;

/// Port: enrich fragment ids with their structural neighborhood.
pub trait IGraphExpansion: Send + Sync {
    /// Expand every id in `fragment_ids`. The returned map holds one entry
    /// per distinct input id; per-fragment failures are recorded inside the
    /// context, and only a store-level failure returns `Err`.
    fn expand(
        &self,
        fragment_ids: &[String],
    ) -> impl Future<Output = Result<BTreeMap<String, ExpansionContext>, ExpansionError>> + Send;
}

impl<T: IGraphExpansion> IGraphExpansion for Arc<T> {
    fn expand(
        &self,
        fragment_ids: &[String],
    ) -> impl Future<Output = Result<BTreeMap<String, ExpansionContext>, ExpansionError>> + Send {
        (**self).expand(fragment_ids)
    }
}
