use anyhow::Context;
use clap::Parser;
use tarot_oracle::config::cli::{CliArgs, FileStorage};
use tarot_oracle::utils::{logger, validation};
use tarot_oracle::{load_config, save_config, spreads, Catalog, DrawEngine, ReadingClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let catalog = Catalog::embedded().context("failed to load the embedded card catalog")?;

    if args.list_spreads {
        for spread in spreads::all() {
            println!(
                "{:<14} {}（{} 张）——{}",
                spread.id,
                spread.name,
                spread.positions.len(),
                spread.description
            );
        }
        return Ok(());
    }

    let storage = FileStorage::new(&args.config_dir);
    let mut config = load_config(&storage);

    if let Some(provider) = &args.provider {
        config.switch_provider(provider);
    }
    if let Some(base_url) = &args.base_url {
        validation::validate_url("base-url", base_url)?;
        config.base_url = base_url.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.clone();
    }

    if args.save {
        save_config(&storage, &config)?;
        tracing::info!("配置已保存到 {:?}", args.config_dir);
    }

    let spread = spreads::lookup(&args.spread).with_context(|| {
        format!(
            "unknown spread '{}' (use --list-spreads to see what is available)",
            args.spread
        )
    })?;

    let mut rng = rand::rng();
    let cards = DrawEngine::default().draw(catalog.cards(), spread, &mut rng)?;

    println!("🔮 {}——{}\n", spread.name, spread.description);
    for (index, drawn) in cards.iter().enumerate() {
        println!(
            "  {}. {}「{}」：{} {}（{}）",
            index + 1,
            drawn.position_name,
            drawn.position_meaning,
            drawn.card.name_zh,
            drawn.card.name_en,
            drawn.orientation_label(),
        );
    }

    if config.api_key.is_empty() {
        tracing::info!("未配置 API Key，将返回「静默观测」占位解读");
    }

    let client = ReadingClient::new(config);
    match client.get_reading(&args.question, spread, &cards).await {
        Ok(reading) => println!("\n{}", reading),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
