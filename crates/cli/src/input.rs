//! Reading command input from a file or stdin.

use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read `path` to a string; `-` reads stdin.
pub async fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", path.display()).into())
}
