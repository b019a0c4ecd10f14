use anyhow::Result;
use lifeofpi_showcase::core::config::Config;
use lifeofpi_showcase::core::content::ContentRegistry;
use lifeofpi_showcase::services::preview;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Please check the values in 'config.yml' or remove it to use defaults.");
            return Err(e);
        }
    };

    let registry = ContentRegistry::builtin()?;
    log::info!(
        "Loaded {} slides, {} characters, {} essays, {} questions",
        registry.hero_slides.len(),
        registry.characters.len(),
        registry.sections.len(),
        registry.quiz.len()
    );

    preview::run(config, registry).await
}
