//! Client facade
//!
//! Wires configuration, transport, local store, session and membership
//! workflow together so a front end only holds one value.

use std::sync::Arc;

use crate::api::Api;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::membership::MembershipWorkflow;
use crate::session::Session;
use crate::store::ClientStore;
use crate::{ClientConfig, ClientResult};

/// Everything a UniVerse front end talks to
///
/// # Example
///
/// ```no_run
/// use universe_client::{ClientConfig, UniverseClient};
///
/// # async fn run() -> universe_client::ClientResult<()> {
/// let client = UniverseClient::connect(ClientConfig::from_env())?;
/// if client.session().restore().await?.is_none() {
///     client.session().login("ana@uni.lk", "secret").await?;
/// }
/// let clubs = client.api().clubs().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UniverseClient {
    api: Api,
    session: Session,
    workflow: MembershipWorkflow,
}

impl UniverseClient {
    /// Network client with an on-disk store at `config.store_path`
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = Arc::new(NetworkHttpClient::new(&config)?);
        let store = ClientStore::open(&config.store_path)?;
        tracing::info!(
            base_url = %config.base_url,
            store = %config.store_path.display(),
            "UniVerse client ready"
        );
        Ok(Self::with_parts(config, http, store))
    }

    /// Assemble from an explicit transport and store
    pub fn with_parts(config: ClientConfig, http: Arc<dyn HttpClient>, store: ClientStore) -> Self {
        let api = Api::new(http);
        let session = Session::new(api.clone(), store.clone());
        let workflow = MembershipWorkflow::new(api.clone(), store, config);
        Self {
            api,
            session,
            workflow,
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn workflow(&self) -> &MembershipWorkflow {
        &self.workflow
    }
}
