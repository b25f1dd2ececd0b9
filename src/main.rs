use ridealong::config::Config;
use ridealong::db::PgPool;
use ridealong::engine::Engine;
use ridealong::error::Error;
use ridealong::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let PgPool(pool) = PgPool::from_config(&config).await?;

    let engine = Engine::new(pool, config.commission_rate).await?;

    serve(engine, config.bind_address).await
}
