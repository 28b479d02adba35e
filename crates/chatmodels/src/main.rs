use chatmodels::{config::Config, logging, PromptRunner};
use chatmodels_llm::{ClientFactory, ProviderConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    logging::init_logging(&config.log);

    let client = ClientFactory::create_chat_client(ProviderConfig::openai_from_env()?)?;
    let runner = PromptRunner::new(client);

    let mut stdout = std::io::stdout();
    runner.run(&mut stdout).await
}
