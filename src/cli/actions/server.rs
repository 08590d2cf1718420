use crate::{
    accounts::StoredAccounts,
    auth::MockAuthService,
    session::SessionContext,
    storage::FileStore,
    web,
};
use anyhow::{Context, Result};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub latency: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the data directory cannot be opened or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let store = Arc::new(
        FileStore::open(&args.data_dir)
            .with_context(|| format!("Failed to open data directory {}", args.data_dir.display()))?,
    );
    info!("Using storage file {}", store.path().display());

    let accounts = Arc::new(StoredAccounts::new(store.clone()));
    let auth = Arc::new(MockAuthService::new(accounts).with_latency(args.latency));
    let session = Arc::new(SessionContext::new(store, auth));

    web::serve(args.addr, session).await
}
