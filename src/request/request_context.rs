use std::sync::Arc;

use crate::render::Assets;
use crate::store::ItemStore;

/// Shared handles every handler needs: the item store and the preloaded
/// templates/assets.
#[derive(Debug)]
pub struct RequestContext {
    pub store: Arc<ItemStore>,
    pub assets: Arc<Assets>,
}

impl RequestContext {
    pub fn new(store: Arc<ItemStore>, assets: Arc<Assets>) -> Self {
        RequestContext { store, assets }
    }
}
