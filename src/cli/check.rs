use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::analysis::prefilter::{pre_analyze, public_functions};
use crate::cli::commands::CheckArgs;
use crate::errors::ClarityError;

/// Print the pre-filter verdict for a local source file. No network access.
pub async fn handle_check(args: CheckArgs) -> Result<(), ClarityError> {
    let path = Path::new(&args.file);
    if !path.exists() {
        return Err(ClarityError::Validation(format!("Source file not found: {}", path.display())));
    }
    let source = tokio::fs::read_to_string(path).await?;

    let verdict = pre_analyze(&source);
    info!(
        file = %path.display(),
        malicious = verdict.is_potentially_malicious,
        repetitive_ops = verdict.repetitive_ops,
        "Pre-filter complete"
    );

    let report = json!({
        "file": args.file,
        "verdict": verdict,
        "publicFunctions": public_functions(&source),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
