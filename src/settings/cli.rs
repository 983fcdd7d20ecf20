use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "news-service", about = "Article and identity lookup service")]
pub struct Cli {
    /// Path to a TOML settings file.
    #[arg(long)]
    pub settings: Option<String>,
}
