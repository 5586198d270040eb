use std::time::Duration;

use serde::Deserialize;

use crate::core::errors::{KeywardenError, Result};
use crate::core::models::desired_key_set::{DesiredKeySet, RejectedKey};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::key_source::KeySource;

/// Timeout for each request against the contents API.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// One entry in a GitHub contents API directory listing.
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Key source backed by a directory of key files in a GitHub repo.
///
/// Talks to the contents API: one GET for the directory listing, then
/// one raw GET per file. The username is the file stem (`alice.pub` →
/// `alice`), and the key-pair name is the stem plus the managed suffix.
pub struct GithubKeySource {
    contents_url: String,
    token: String,
    managed_suffix: String,
}

impl GithubKeySource {
    pub fn new(contents_url: &str, token: &str, managed_suffix: &str) -> Self {
        // The listing URL doubles as the base for per-file fetches.
        let contents_url = format!("{}/", contents_url.trim_end_matches('/'));
        Self {
            contents_url,
            token: token.to_string(),
            managed_suffix: managed_suffix.to_string(),
        }
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(format!("keywarden/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| KeywardenError::SourceUnavailable {
                reason: format!("failed to create HTTP client: {e}"),
            })
    }

    async fn get_raw(&self, client: &reqwest::Client, url: &str) -> Result<String> {
        let resp = client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3.raw")
            .send()
            .await
            .map_err(|e| KeywardenError::SourceUnavailable {
                reason: format!("GET {url}: {e}"),
            })?;

        if !resp.status().is_success() {
            return Err(KeywardenError::SourceUnavailable {
                reason: format!("GET {url}: HTTP {}", resp.status()),
            });
        }

        resp.text()
            .await
            .map_err(|e| KeywardenError::SourceUnavailable {
                reason: format!("GET {url}: {e}"),
            })
    }

    async fn fetch_all(&self) -> Result<DesiredKeySet> {
        let client = self.build_client()?;

        let listing = self.get_raw(&client, &self.contents_url).await?;
        let entries = parse_listing(&listing)?;

        let mut records = Vec::new();
        let mut rejected = Vec::new();

        for entry in entries {
            let file_url = format!("{}{}", self.contents_url, entry.name);
            let raw = self.get_raw(&client, &file_url).await?;

            let stem = entry.name.split('.').next().unwrap_or(&entry.name);
            let name = format!("{stem}{}", self.managed_suffix);

            match KeyRecord::parse(&name, &raw) {
                Ok(record) => records.push(record),
                Err(KeywardenError::MalformedKey { name, detail }) => {
                    rejected.push(RejectedKey {
                        name,
                        reason: detail,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(DesiredKeySet::from_records(records, rejected))
    }
}

/// Parse a contents API directory listing, keeping only plain files.
fn parse_listing(body: &str) -> Result<Vec<ContentsEntry>> {
    let entries: Vec<ContentsEntry> =
        serde_json::from_str(body).map_err(|e| KeywardenError::SourceUnavailable {
            reason: format!("unexpected contents API response: {e}"),
        })?;
    Ok(entries.into_iter().filter(|e| e.kind == "file").collect())
}

impl KeySource for GithubKeySource {
    fn fetch_desired_keys(&self) -> Result<DesiredKeySet> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| KeywardenError::SourceUnavailable {
                reason: format!("failed to start runtime: {e}"),
            })?;

        rt.block_on(self.fetch_all())
    }
}
