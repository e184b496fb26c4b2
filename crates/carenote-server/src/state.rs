use std::sync::Arc;

use tokio::sync::OnceCell;

use carenote_core::models::kb::KbSnapshot;
use carenote_forms::FormRegistry;
use carenote_kb::error::KbError;
use carenote_kb::fetch::HttpFetcher;
use carenote_kb::loader::KbLoader;
use carenote_kb::search::KbSearch;
use carenote_polish::polish::Polisher;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<FormRegistry>,
    pub kb: Arc<KbService>,
    pub polisher: Option<Arc<dyn Polisher>>,
}

/// A loaded snapshot together with its search index.
pub struct LoadedKb {
    pub snapshot: KbSnapshot,
    pub search: KbSearch,
}

/// Loads the KB on first use and shares it afterwards.
///
/// The first successful load is kept for the life of the process. A failed
/// load leaves the cell empty, so the next request tries again.
pub struct KbService {
    loader: KbLoader<HttpFetcher>,
    loaded: OnceCell<Arc<LoadedKb>>,
}

impl KbService {
    pub fn new(loader: KbLoader<HttpFetcher>) -> Self {
        Self {
            loader,
            loaded: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    pub async fn get(&self) -> Result<Arc<LoadedKb>, KbError> {
        self.loaded
            .get_or_try_init(|| async {
                let snapshot = self.loader.load().await?;
                let (snapshot, search) = tokio::task::spawn_blocking(move || {
                    let search = KbSearch::build(&snapshot.search_index.docs)?;
                    Ok::<_, KbError>((snapshot, search))
                })
                .await
                .map_err(std::io::Error::other)??;
                Ok::<_, KbError>(Arc::new(LoadedKb { snapshot, search }))
            })
            .await
            .cloned()
    }
}
