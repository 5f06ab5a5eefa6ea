//! External OCR pass over scanned PDFs.
//!
//! Runs the configured OCR command (`ocrmypdf` by default) as
//! `COMMAND ARGS... INPUT OUTPUT` inside a temporary directory. Any failure,
//! including a missing binary or a timeout, yields the original bytes.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use wellx_core::models::config::OcrConfig;

/// OCR `data`, returning the OCR'd PDF or the original bytes.
pub async fn ocr_pdf(data: &[u8], config: &OcrConfig) -> Vec<u8> {
    match run_ocr(data, config).await {
        Ok(ocred) => {
            info!("OCR produced {} bytes", ocred.len());
            ocred
        }
        Err(e) => {
            warn!("OCR skipped: {}", e);
            data.to_vec()
        }
    }
}

async fn run_ocr(data: &[u8], config: &OcrConfig) -> anyhow::Result<Vec<u8>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.pdf");
    let output = dir.path().join("ocr_output.pdf");
    tokio::fs::write(&input, data).await?;

    debug!("Running {} {:?}", config.command, config.args);

    let mut command = Command::new(&config.command);
    command.args(&config.args).arg(&input).arg(&output).kill_on_drop(true);

    let timeout = Duration::from_secs(config.timeout_secs);
    let result = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result?,
        Err(_) => anyhow::bail!("{} timed out after {}s", config.command, config.timeout_secs),
    };

    if !result.status.success() {
        anyhow::bail!(
            "{} exited with {}: {}",
            config.command,
            result.status,
            String::from_utf8_lossy(&result.stderr).trim()
        );
    }

    let ocred = tokio::fs::read(&output).await?;
    if ocred.is_empty() {
        anyhow::bail!("{} produced an empty file", config.command);
    }
    Ok(ocred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_returns_original() {
        let config = OcrConfig {
            command: "wellx-no-such-ocr-binary".to_string(),
            ..OcrConfig::default()
        };

        let data = b"%PDF-1.5 original".to_vec();
        assert_eq!(ocr_pdf(&data, &config).await, data);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_returns_original() {
        let config = OcrConfig {
            command: "false".to_string(),
            args: Vec::new(),
            ..OcrConfig::default()
        };

        let data = b"%PDF-1.5 original".to_vec();
        assert_eq!(ocr_pdf(&data, &config).await, data);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_returns_original() {
        let config = OcrConfig {
            command: "sleep".to_string(),
            args: vec!["5".to_string()],
            timeout_secs: 0,
            ..OcrConfig::default()
        };

        let data = b"%PDF-1.5 original".to_vec();
        assert_eq!(ocr_pdf(&data, &config).await, data);
    }
}
