use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioDownloadError, AudioDownloader};

pub const DEFAULT_YT_DLP_PATH: &str = "yt-dlp";
const OUTPUT_STEM: &str = "audio";
const FORMAT_SELECTOR: &str = "bestaudio/best";
const PLAYER_CLIENT_ARGS: &str = "youtube:player_client=android";
const STDERR_TAIL_CHARS: usize = 500;

/// Fetches the audio-only stream with the `yt-dlp` command line tool.
pub struct YtDlpDownloader {
    binary: PathBuf,
    cookie_file: Option<PathBuf>,
    user_agent: String,
    timeout: Duration,
}

impl YtDlpDownloader {
    pub fn new(
        binary: impl Into<PathBuf>,
        cookie_file: Option<PathBuf>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            binary: binary.into(),
            cookie_file,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Arguments passed to the tool. The cookie file is only forwarded when it exists.
    pub fn build_args(&self, url: &str, dest_dir: &Path) -> Vec<String> {
        let template = dest_dir.join(format!("{}.%(ext)s", OUTPUT_STEM));
        let mut args = vec![
            "-f".to_string(),
            FORMAT_SELECTOR.to_string(),
            "--no-playlist".to_string(),
            "--user-agent".to_string(),
            self.user_agent.clone(),
            "--extractor-args".to_string(),
            PLAYER_CLIENT_ARGS.to_string(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
        ];

        if let Some(cookies) = self.cookie_file.as_ref().filter(|p| p.is_file()) {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }

        args.push(url.to_string());
        args
    }
}

/// Newest regular file in `dir` whose stem is `stem`, ignoring partial downloads.
pub async fn newest_matching_file(dir: &Path, stem: &str) -> Result<Option<PathBuf>, std::io::Error> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches_stem = path.file_stem().and_then(|s| s.to_str()) == Some(stem);
        let partial = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "part" || e == "ytdl");
        if !matches_stem || partial {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, p)| p))
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max_chars)).collect()
}

#[async_trait]
impl AudioDownloader for YtDlpDownloader {
    async fn download_audio(
        &self,
        url: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, AudioDownloadError> {
        tokio::fs::create_dir_all(dest_dir).await?;
        let args = self.build_args(url, dest_dir);

        tracing::debug!(
            binary = %self.binary.display(),
            dest = %dest_dir.display(),
            "Starting audio download"
        );

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    AudioDownloadError::ToolMissing(self.binary.display().to_string())
                }
                _ => AudioDownloadError::Io(e),
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AudioDownloadError::TimedOut(self.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioDownloadError::DownloadFailed(format!(
                "{}: {}",
                output.status,
                tail(stderr.trim(), STDERR_TAIL_CHARS)
            )));
        }

        let path = newest_matching_file(dest_dir, OUTPUT_STEM)
            .await?
            .ok_or_else(|| AudioDownloadError::NoOutput(dest_dir.display().to_string()))?;

        tracing::info!(path = %path.display(), "Audio downloaded");
        Ok(path)
    }
}
