use std::sync::Arc;

use inkpost_auth::Passwords;
use inkpost_core::DomainResult;
use inkpost_infra::{
    AccountService, AppConfig, InMemoryStore, PostService, PostStore, TokenRegistry, TokenStore,
    UserStore,
};

/// Services shared by every handler, installed as a router extension.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: AccountService,
    pub posts: PostService,
}

impl AppServices {
    pub fn from_stores(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let registry = TokenRegistry::new(tokens, users.clone());
        Self {
            accounts: AccountService::new(users.clone(), registry, Passwords::default()),
            posts: PostService::new(posts, users),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_stores(store.clone(), store.clone(), store)
    }

    #[cfg(feature = "postgres")]
    pub async fn postgres(database_url: &str) -> DomainResult<Self> {
        let store = Arc::new(inkpost_infra::store::PostgresStore::connect(database_url).await?);
        store.ensure_schema().await?;
        Ok(Self::from_stores(store.clone(), store.clone(), store))
    }

    pub async fn from_config(config: &AppConfig) -> DomainResult<Self> {
        if !config.use_persistent_stores {
            tracing::info!("using in-memory stores");
            return Ok(Self::in_memory());
        }

        #[cfg(feature = "postgres")]
        {
            let url = config.database_url.as_deref().ok_or_else(|| {
                inkpost_core::DomainError::storage("DATABASE_URL is not set")
            })?;
            tracing::info!("using postgres stores");
            Self::postgres(url).await
        }

        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but built without the postgres feature; \
                 falling back to in-memory stores"
            );
            Ok(Self::in_memory())
        }
    }
}
