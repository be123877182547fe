//! Command line driver: mounts a list view against the configured service and
//! prints the requested page.
//!
//! Usage: `pushkind-posts [SEARCH] [PAGE]`

use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;

use pushkind_posts::client::HttpClient;
use pushkind_posts::domain::filter::FilterField;
use pushkind_posts::dto::list_view::ListViewSnapshot;
use pushkind_posts::models::config::ClientConfig;
use pushkind_posts::services::ServiceResult;
use pushkind_posts::services::list_view::{ListViewController, ViewSettings};

fn print_snapshot(snapshot: &ListViewSnapshot) {
    if let Some(stats) = &snapshot.stats {
        println!(
            "{} posts, {} likes, {} comments, {:.1}% avg engagement",
            stats.total_posts, stats.total_likes, stats.total_comments, stats.avg_engagement
        );
    }

    for post in &snapshot.posts.items {
        println!(
            "#{:<6} {} | {} | {} likes, {} comments",
            post.id,
            post.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string()),
            post.author.name,
            post.engagement.likes,
            post.engagement.comments
        );
        println!("        {}", post.content.lines().next().unwrap_or_default());
    }

    if !snapshot.posts.pages.is_empty() {
        let strip: Vec<String> = snapshot
            .posts
            .pages
            .iter()
            .map(|page| {
                if *page == snapshot.posts.page {
                    format!("[{page}]")
                } else {
                    page.to_string()
                }
            })
            .collect();
        println!(
            "Page {} of {}: {}",
            snapshot.posts.page,
            snapshot.posts.total_pages,
            strip.join(" ")
        );
    }
}

async fn run(config: ClientConfig, search: Option<String>, page: usize) -> ServiceResult<()> {
    let client = HttpClient::from_config(&config)?;
    let view = ListViewController::new(client, ViewSettings::from(&config));

    if let Some(search) = search {
        view.set_draft_field(FilterField::Search, &search)?;
        view.apply_filters().await?;
    } else {
        view.sync().await?;
    }
    if page > 1 {
        view.go_to_page(page).await?;
    }
    if let Err(err) = view.refresh_stats().await {
        log::warn!("Continuing without stats: {err}");
    }

    print_snapshot(&view.snapshot());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ClientConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut args = env::args().skip(1);
    let search = args.next().filter(|s| !s.trim().is_empty());
    let page = match args.next().map(|p| p.parse::<usize>()) {
        Some(Ok(page)) => page,
        Some(Err(err)) => {
            log::error!("Invalid page number: {err}");
            return ExitCode::FAILURE;
        }
        None => 1,
    };

    match run(config, search, page).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
