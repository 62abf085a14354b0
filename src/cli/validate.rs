use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::config::parse_config;
use crate::errors::ClarityError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), ClarityError> {
    let path = PathBuf::from(&args.config);
    let config = parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    println!("  provider: {} ({})", config.provider.model, config.provider.api_url);
    println!("  explorer: {}", config.explorer.base_url);
    println!("  listen:   {}:{}", config.server.host, config.server.port);
    if let Some(dir) = &config.prompts.directory {
        println!("  prompts:  {}", dir);
    }
    Ok(())
}
