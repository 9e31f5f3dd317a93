//! Load configuration from environment variables.

use anyhow::Result;

fn main() -> Result<()> {
    let config = quizline::Config::from_env()?;
    config.validate()?;
    println!(
        "bind_addr={}, port={}, database_url={}, threshold={}",
        config.bind_addr, config.port, config.database_url, config.similarity_threshold
    );
    Ok(())
}
