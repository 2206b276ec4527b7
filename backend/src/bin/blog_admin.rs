//! Operator commands for a database-backed blog deployment.
//!
//! ```text
//! blog-admin migrate
//! blog-admin create-user leo --password s3cret
//! blog-admin create-group cats --title Cats --description "Cat pictures"
//! blog-admin clear-cache
//! ```
//!
//! Connection strings come from `--database-url`/`--redis-url` or the
//! `BLOG_DATABASE_URL`/`BLOG_REDIS_URL` environment variables.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::time::Duration;

use blog::domain::ports::{GroupRepository, PageCache};
use blog::domain::{NewGroup, Username};
use blog::outbound::cache::RedisPageCache;
use blog::outbound::persistence::{
    DbPool, DieselGroupRepository, DieselUserRepository, PoolConfig, hash_password,
    run_migrations,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::runtime::Builder;
use zeroize::Zeroizing;

/// `blog-admin` command arguments.
#[derive(Debug, Parser)]
#[command(name = "blog-admin", about = "Administer blog storage and caches", version)]
struct CliArgs {
    /// PostgreSQL connection URL.
    #[arg(long, env = "BLOG_DATABASE_URL", global = true, value_name = "url")]
    database_url: Option<String>,
    /// Redis connection URL of the page cache.
    #[arg(long, env = "BLOG_REDIS_URL", global = true, value_name = "url")]
    redis_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Register an author account.
    CreateUser {
        /// Login name.
        username: String,
        /// Plain-text password; stored as an argon2id hash.
        #[arg(long)]
        password: String,
    },
    /// Create a group posts can be filed under.
    CreateGroup {
        /// URL slug.
        slug: String,
        /// Display title.
        #[arg(long)]
        title: String,
        /// Free-form description.
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Drop every cached feed page.
    ClearCache,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str> {
    value.ok_or_else(|| eyre!("{flag} is required for this command"))
}

async fn pool(database_url: Option<&str>) -> Result<DbPool> {
    let url = required(database_url, "--database-url")?;
    DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .wrap_err("create database pool")
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = args.database_url.as_deref();
    match args.command {
        Command::Migrate => {
            let applied = run_migrations(required(database_url, "--database-url")?)?;
            println!("applied={}", applied.len());
            for version in applied {
                println!("migration={version}");
            }
        }
        Command::CreateUser { username, password } => {
            let password = Zeroizing::new(password);
            let username = Username::new(username)?;
            let hash = hash_password(&password)?;
            let user = DieselUserRepository::new(pool(database_url).await?)
                .create(&username, &hash)
                .await?;
            println!("user_id={}", user.id());
            println!("username={}", user.username());
        }
        Command::CreateGroup {
            slug,
            title,
            description,
        } => {
            let group = NewGroup::try_new(slug, title, description)?;
            let stored = DieselGroupRepository::new(pool(database_url).await?)
                .create(&group)
                .await?;
            println!("group_id={}", stored.id());
            println!("slug={}", stored.slug());
        }
        Command::ClearCache => {
            let url = required(args.redis_url.as_deref(), "--redis-url")?;
            // TTL is irrelevant when only clearing.
            let cache = RedisPageCache::connect(url, Duration::from_secs(1)).await?;
            cache.clear().await?;
            println!("cleared=true");
        }
    }
    Ok(())
}
