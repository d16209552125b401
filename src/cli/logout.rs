use crate::{error, session::SessionStore, success};

pub async fn logout() {
    let store = SessionStore::default();
    if let Err(e) = store.clear().await {
        error!("Failed to remove session {}. Err: {}", store.path().display(), e);
    }
    success!("Signed out.");
}
