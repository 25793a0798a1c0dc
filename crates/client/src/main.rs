//! `shelfside` — sign in against the inventory backend and persist the
//! session for subsequent tooling.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use shelfside_auth::{Access, KeyRegistry, KeyRotationMonitor, RouteGuard};
use shelfside_client::{CredentialSubmitter, Credentials};
use shelfside_session::{FileSessionStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shelfside_observability::init();

    let api_url = std::env::var("SHELFSIDE_API_URL").unwrap_or_else(|_| {
        tracing::warn!("SHELFSIDE_API_URL not set; using http://localhost:8080");
        "http://localhost:8080".to_string()
    });

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: shelfside <username> <password>");
        std::process::exit(2);
    };

    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new().context("failed to open the session store")?);

    // Registry knowledge comes from the key distribution service; seed the
    // current id from the environment when it is known ahead of time.
    let monitor = match std::env::var("SHELFSIDE_CURRENT_KEY_ID") {
        Ok(kid) => Arc::new(KeyRotationMonitor::with_registry(KeyRegistry::bootstrap(
            kid,
            Utc::now(),
        ))),
        Err(_) => Arc::new(KeyRotationMonitor::new()),
    };

    let mut submitter = CredentialSubmitter::new(api_url, store, monitor);

    match submitter.submit(&Credentials::new(username, password)).await {
        Ok(session) => {
            println!("signed in as {} ({})", session.username, session.role);

            let guard = RouteGuard::standard();
            for path in ["/dashboard", "/products", "/admin"] {
                if guard.decide(session.role, path) == Access::Granted {
                    println!("  may access {path}");
                }
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }
}
