use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
pub struct FlatConfig {
    #[arg(env = "DATABASE_URL", required = true, help = "Postgres connection string")]
    database_url: String,

    #[arg(env = "BIND_ADDR", default_value = "[::]:3000", help = "Address to listen on")]
    bind_addr: String,

    #[arg(env = "UPLOAD_DIR", default_value = "uploads", help = "Directory for uploaded posters")]
    upload_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfiguration,
    pub http: HttpConfiguration,
    pub storage: StorageConfiguration,
}

#[derive(Debug, Clone)]
pub struct DbConfiguration {
    pub database_url: String, // DATABASE_URL
}

#[derive(Debug, Clone)]
pub struct HttpConfiguration {
    pub bind_addr: String, // BIND_ADDR
}

#[derive(Debug, Clone)]
pub struct StorageConfiguration {
    pub upload_dir: PathBuf, // UPLOAD_DIR
}

impl From<FlatConfig> for Config {
    fn from(value: FlatConfig) -> Self {
        Config {
            db: DbConfiguration {
                database_url: value.database_url,
            },
            http: HttpConfiguration {
                bind_addr: value.bind_addr,
            },
            storage: StorageConfiguration {
                upload_dir: value.upload_dir,
            },
        }
    }
}
