use std::env;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use galleria::{
    AppConfig, Category, ContentItem, ContentStore, GalleryClient, MediaResolver, SortOrder,
    DEFAULT_LATEST_LIMIT,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(
        backend_url = %config.backend_url,
        api_key = %config.redacted_api_key(),
        "loaded gallery configuration"
    );
    let client = GalleryClient::new(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => {
            let Some(raw) = args.get(1) else {
                bail!("usage: gallery list <category> [newest|oldest|popular]");
            };
            let category: Category = raw.parse()?;
            let sort = match args.get(2).map(String::as_str) {
                Some("oldest") => SortOrder::Oldest,
                Some("popular") => SortOrder::Popular,
                _ => SortOrder::Newest,
            };
            let mut items = client.content_by_category(category).await?;
            sort.apply(&mut items);
            if items.is_empty() {
                println!("no content in {category} yet");
            }
            for item in &items {
                print_item(item);
            }
        }
        Some("show") => {
            let Some(raw) = args.get(1) else {
                bail!("usage: gallery show <content-id>");
            };
            let id: Uuid = raw.parse()?;
            let item = client.content_by_id(id).await?;
            print_item(&item);
            println!("  {}", item.body);
            let resolver = MediaResolver::with_placeholder(
                Arc::new(client.clone()),
                config.placeholder_url.clone(),
            );
            for resolved in resolver.resolve_item(&item).await {
                println!("  [{:?}] {}", resolved.media.kind, resolved.url);
            }
        }
        Some("featured") => {
            for item in client.featured().await? {
                print_item(&item);
            }
        }
        Some("latest") => {
            let limit = args
                .get(1)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_LATEST_LIMIT);
            for item in client.latest(limit).await? {
                println!(
                    "{}  {}  by {}  ({})",
                    item.content_id, item.title, item.author_name, item.category
                );
            }
        }
        Some("updates") => {
            for update in client.updates().await? {
                println!(
                    "{}  {}  {}",
                    update.created_at.format("%Y-%m-%d"),
                    update.title,
                    update.desc
                );
            }
        }
        _ => {
            bail!(
                "usage: gallery <list <category> [sort] | show <id> | featured | latest [n] | updates>"
            );
        }
    }

    Ok(())
}

fn print_item(item: &ContentItem) {
    let featured = if item.is_featured { "  [featured]" } else { "" };
    println!(
        "{}  {}  by {} ({}){}",
        item.content_id,
        item.title,
        item.author_name,
        item.created_at.format("%Y-%m-%d"),
        featured
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
