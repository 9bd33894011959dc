use anyhow::Context;
use collection_service::{
    config::Config, domain::service::CollectionServiceImpl, entrypoint::Entrypoint,
    inbound::app, outbound::memory::InMemoryCollectionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("expected to be able to generate config")?;
    Entrypoint::new(config.environment).init();

    let store = InMemoryCollectionStore::new();
    let service = CollectionServiceImpl::new(
        store.clone(),
        store,
        config.serializer_settings(),
        config.link_resolver()?,
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .context("could not bind port")?;

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        "collection service is up and running"
    );

    axum::serve(listener, app(service).into_make_service())
        .await
        .context("error starting service")
}
