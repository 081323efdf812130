// campus-crawler: crawl the allowlisted academic domains and report the
// aggregate statistics.
//
// Usage: campus-crawler [--config <path>] [--restart]

use std::path::PathBuf;

use anyhow::{Result, bail};
use log::info;

use campus_crawler::CrawlConfig;

struct Args {
    config_path: PathBuf,
    restart: bool,
}

fn parse_args() -> Result<Args> {
    let mut config_path = PathBuf::from("config.json");
    let mut restart = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = PathBuf::from(path),
                None => bail!("--config requires a path"),
            },
            "--restart" => restart = true,
            other => bail!("unrecognized argument: {other}"),
        }
    }

    Ok(Args {
        config_path,
        restart,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = if args.config_path.exists() {
        CrawlConfig::from_file(&args.config_path)?
    } else {
        info!("no config at {}, using defaults", args.config_path.display());
        CrawlConfig::default()
    };

    campus_crawler::crawl(config, args.restart).await?;
    Ok(())
}
