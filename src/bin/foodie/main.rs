use anyhow::Context;
use foodie_review::{config::Config, seed, state::AppState};
use tokio::io::BufReader;

mod handlers;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_ansi(true)
        .with_file(false)
        .with_writer(std::io::stderr)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let catalog = seed::load().context("fail to load the seed catalog")?;
    tracing::info!(
        cuisines = catalog.list_cuisines().len(),
        restaurants = catalog.restaurants().len(),
        "catalog ready"
    );
    let mut state = AppState::new(catalog);

    let stdin = BufReader::new(tokio::io::stdin());
    handlers::run(stdin, tokio::io::stdout(), &mut state, &config).await
}
