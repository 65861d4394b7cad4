use anyhow::{anyhow, Context};
use std::env;
use std::path::PathBuf;

use crate::entities::MAX_IMAGE_SIZE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub media_root: PathBuf,
    pub max_request_size: usize,
    pub run_migrations: bool,
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .map(|x| x.parse::<T>())
        .unwrap_or(Ok(default))
        .context(name.to_owned())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        let port = parse_var("PORT", 8080)?;
        let host = env::var("HOST").unwrap_or_else(|_| "localhost".to_owned());
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL")?;
        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 5)?;
        let media_root = env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("media"));
        // 画像の上限を超えたものもフォームのエラーとして返せるよう余裕を持たせる
        let max_request_size = parse_var("MAX_REQUEST_SIZE", MAX_IMAGE_SIZE + 1024 * 1024)?;
        let run_migrations = match env::var("RUN_MIGRATIONS").as_deref() {
            Ok("TRUE") | Err(_) => true,
            Ok("FALSE") => false,
            Ok(other) => return Err(anyhow!("Invalid RUN_MIGRATIONS: {}", other)),
        };

        Ok(AppConfig {
            port,
            host,
            database_url,
            database_max_connections,
            media_root,
            max_request_size,
            run_migrations,
        })
    }
}
