// Where the ranked list comes from: a local file or the rankings API.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::rankings::{parse_rankings_csv, parse_rankings_json};
use super::PoolError;
use crate::config::{Config, PoolSourceKind};
use crate::draft::Candidate;

/// A provider of the ranked golfer list, best first.
#[async_trait]
pub trait RankingsSource: Send + Sync {
    /// Short human-readable label for logs and the status bar.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Candidate>, PoolError>;
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// Reads a saved rankings file. The extension selects the format.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RankingsSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Candidate>, PoolError> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if !matches!(ext.as_deref(), Some("json") | Some("csv")) {
            return Err(PoolError::UnsupportedFormat {
                path: self.describe(),
            });
        }

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| PoolError::Io {
                path: self.describe(),
                source: e,
            })?;
        debug!("Read {} bytes from {}", bytes.len(), self.describe());

        match ext.as_deref() {
            Some("csv") => parse_rankings_csv(bytes.as_slice()),
            _ => parse_rankings_json(bytes.as_slice()),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpSource
// ---------------------------------------------------------------------------

/// Fetches the season's ranking stat from the RapidAPI golf data service.
///
/// One request per fetch; failures are returned as-is with no retry.
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
    year: i32,
    stat_id: String,
}

impl HttpSource {
    pub fn new(api_key: String, host: String, year: i32, stat_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("https://{host}"),
            host,
            api_key,
            year,
            stat_id,
        }
    }

    /// Send requests to `base_url` instead of `https://{host}`. The
    /// `X-RapidAPI-Host` header still carries the configured host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/stats?year={}&statId={}",
            self.base_url, self.year, self.stat_id
        )
    }
}

#[async_trait]
impl RankingsSource for HttpSource {
    fn describe(&self) -> String {
        format!("{} (stat {}, {})", self.host, self.stat_id, self.year)
    }

    async fn fetch(&self) -> Result<Vec<Candidate>, PoolError> {
        let url = self.url();
        info!("Fetching rankings from {url}");

        let body = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!("Rankings response: {} bytes", body.len());

        parse_rankings_json(body.as_ref())
    }
}

/// Build the source selected by `[pool] source` in draft.toml.
pub fn source_from_config(config: &Config) -> Result<Box<dyn RankingsSource>, PoolError> {
    match config.pool.source {
        PoolSourceKind::File => Ok(Box::new(FileSource::new(&config.pool.path))),
        PoolSourceKind::Api => match &config.credentials.rapidapi_key {
            Some(key) if !key.trim().is_empty() => Ok(Box::new(HttpSource::new(
                key.trim().to_string(),
                config.api.host.clone(),
                config.api.year,
                config.api.stat_id.clone(),
            ))),
            _ => Err(PoolError::MissingApiKey),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, CredentialsConfig, DraftConfig, PoolConfig};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(source: PoolSourceKind, key: Option<&str>) -> Config {
        Config {
            draft: DraftConfig {
                num_teams: 2,
                team_names: vec![],
            },
            pool: PoolConfig {
                source,
                path: "rankings.json".into(),
                tier_count: 4,
                tier_size: 10,
            },
            api: ApiConfig {
                host: "live-golf-data.p.rapidapi.com".into(),
                stat_id: "186".into(),
                year: 2025,
            },
            credentials: CredentialsConfig {
                rapidapi_key: key.map(String::from),
            },
        }
    }

    /// Serve one canned HTTP response and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn http_source_sends_rapidapi_headers() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"rankings":[{"playerId":"1","fullName":"Tom Kim","rank":"1"}]}"#,
        )
        .await;

        let source = HttpSource::new(
            "secret".into(),
            "live-golf-data.p.rapidapi.com".into(),
            2025,
            "186".into(),
        )
        .with_base_url(base);
        let list = source.fetch().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].full_name, "Tom Kim");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /stats?year=2025&statid=186 "));
        assert!(request.contains("x-rapidapi-key: secret"));
        assert!(request.contains("x-rapidapi-host: live-golf-data.p.rapidapi.com"));
    }

    #[tokio::test]
    async fn http_source_error_status() {
        let (base, server) = serve_once("HTTP/1.1 403 Forbidden", r#"{"message":"nope"}"#).await;
        let source = HttpSource::new("bad".into(), "example.com".into(), 2025, "186".into())
            .with_base_url(base);

        assert!(matches!(source.fetch().await, Err(PoolError::Http(_))));
        server.await.unwrap();
    }

    #[test]
    fn url_uses_host_year_and_stat() {
        let source = HttpSource::new("k".into(), "golf.example".into(), 2024, "02671".into());
        assert_eq!(source.url(), "https://golf.example/stats?year=2024&statId=02671");
    }

    #[tokio::test]
    async fn file_source_reads_json_and_csv() {
        let dir = std::env::temp_dir().join("golfdraft_file_source");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("rankings.json");
        std::fs::write(
            &json_path,
            r#"{"rankings":[{"playerId":"1","fullName":"Tom Kim"},{"playerId":"2","fullName":"Tom Hoge"}]}"#,
        )
        .unwrap();
        let csv_path = dir.join("rankings.CSV");
        std::fs::write(&csv_path, "id,full_name\n3,Max Homa\n").unwrap();

        assert_eq!(FileSource::new(&json_path).fetch().await.unwrap().len(), 2);
        let csv_list = FileSource::new(&csv_path).fetch().await.unwrap();
        assert_eq!(csv_list[0].full_name, "Max Homa");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn file_source_errors() {
        let missing = FileSource::new("/nonexistent/golfdraft/rankings.json");
        assert!(matches!(missing.fetch().await, Err(PoolError::Io { .. })));

        let unsupported = FileSource::new("rankings.xlsx");
        assert!(matches!(
            unsupported.fetch().await,
            Err(PoolError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn source_from_config_selects_source() {
        let file = source_from_config(&config(PoolSourceKind::File, None)).unwrap();
        assert_eq!(file.describe(), "rankings.json");

        let api = source_from_config(&config(PoolSourceKind::Api, Some("key"))).unwrap();
        assert!(api.describe().starts_with("live-golf-data.p.rapidapi.com"));
    }

    #[test]
    fn api_source_requires_key() {
        assert!(matches!(
            source_from_config(&config(PoolSourceKind::Api, None)),
            Err(PoolError::MissingApiKey)
        ));
        assert!(matches!(
            source_from_config(&config(PoolSourceKind::Api, Some("  "))),
            Err(PoolError::MissingApiKey)
        ));
    }
}
