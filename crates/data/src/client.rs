//! `reqwest` implementation of [`ExplorerApi`].

use crate::config::ExplorerConfig;
use crate::error::{ApiError, Result};
use crate::file_viewer::RetrievedFile;
use crate::provider::ExplorerApi;
use archive_explorer_domain::entities::{
    Block, FileProvingWindow, StorageContract, Transaction, WalletBalance, WalletDetails,
};
use archive_explorer_domain::metrics::MinedCoins;
use archive_explorer_domain::value_objects::NumberOrString;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// HTTP client for the explorer backend.
#[derive(Debug, Clone)]
pub struct HttpExplorerClient {
    http: reqwest::Client,
    config: ExplorerConfig,
}

impl HttpExplorerClient {
    /// Creates a client with the configured request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ExplorerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn explorer_url(&self, endpoint: &str) -> String {
        format!(
            "{}/explorer/{}",
            self.config.backend_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// GETs an explorer endpoint and decodes its JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let url = self.explorer_url(endpoint);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).query(query).send().await.inspect_err(|e| {
            error!(endpoint, error = %e, "Request failed");
        })?;

        if let Some(e) = status_error(endpoint, response.status()) {
            return Err(e);
        }

        let body = response.bytes().await?;
        decode_optional(endpoint, &body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        Ok(self.get_json(endpoint, query).await?.unwrap_or_default())
    }

    /// GETs a scalar statistic. Bodies that are not JSON are kept as text.
    async fn get_scalar(&self, endpoint: &str) -> Result<Option<NumberOrString>> {
        let url = self.explorer_url(endpoint);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).send().await.inspect_err(|e| {
            error!(endpoint, error = %e, "Request failed");
        })?;
        if let Some(e) = status_error(endpoint, response.status()) {
            return Err(e);
        }

        let text = response.text().await?;
        Ok(decode_scalar(&text))
    }

    /// POSTs a JSON body and returns the acknowledgement text.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> Result<String> {
        let url = self.explorer_url(endpoint);
        debug!(url = %url, "POST");

        let response = self.http.post(&url).json(body).send().await?;
        if let Some(e) = status_error(endpoint, response.status()) {
            return Err(e);
        }

        let text = response.text().await?;
        Ok(decode_acknowledgement(&text, fallback))
    }
}

/// Maps a non-success status to [`ApiError::Status`], logging it.
fn status_error(endpoint: &str, status: StatusCode) -> Option<ApiError> {
    if status.is_success() {
        return None;
    }
    error!(endpoint, status = status.as_u16(), "Backend returned error status");
    Some(ApiError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
    })
}

/// Decodes a JSON body where empty or `null` means absent.
fn decode_optional<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn decode_scalar(text: &str) -> Option<NumberOrString> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }
    serde_json::from_str(trimmed)
        .ok()
        .or_else(|| Some(NumberOrString::Text(trimmed.to_string())))
}

/// Acknowledgements come back either as a JSON string or as plain text.
fn decode_acknowledgement(text: &str, fallback: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return fallback.to_string();
    }
    serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_string())
}

fn archive_payload(file: &serde_json::Value, data: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "file": file, "data": data })
}

#[async_trait]
impl ExplorerApi for HttpExplorerClient {
    async fn get_blocks(&self, limit: Option<usize>) -> Result<Vec<Block>> {
        let query: Vec<(&str, String)> = limit
            .map(|l| vec![("limit", l.to_string())])
            .unwrap_or_default();
        self.get_list("getBlocks", &query).await
    }

    async fn get_block(&self, height: u64) -> Result<Option<Block>> {
        self.get_json("getBlock", &[("index", height.to_string())])
            .await
    }

    async fn get_wallet_balances(&self) -> Result<Vec<WalletBalance>> {
        self.get_list("walletBalances", &[]).await
    }

    async fn get_wallet_details(&self, address: &str) -> Result<Option<WalletDetails>> {
        self.get_json("getWalletDetails", &[("address", address.to_string())])
            .await
    }

    async fn get_stored_files(&self) -> Result<Vec<String>> {
        self.get_list("storedFiles", &[]).await
    }

    async fn get_storage_contracts(&self, file_name: &str) -> Result<Vec<StorageContract>> {
        self.get_list("storageContracts", &[("fileName", file_name.to_string())])
            .await
    }

    async fn get_storage_contracts_chunk(
        &self,
        file_name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<StorageContract>> {
        self.get_list(
            "storageContractsChunk",
            &[
                ("fileName", file_name.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        file_url: &str,
    ) -> Result<Option<StorageContract>> {
        self.get_json(
            "getStorageContract",
            &[
                ("contractHash", contract_hash.to_string()),
                ("fileUrl", file_url.to_string()),
            ],
        )
        .await
    }

    async fn get_contract_file_proving_windows(
        &self,
        contract_hash: &str,
    ) -> Result<Vec<FileProvingWindow>> {
        self.get_list(
            "getContractFileProvingWindows",
            &[("contractHash", contract_hash.to_string())],
        )
        .await
    }

    async fn get_archived_storage(&self) -> Result<Option<NumberOrString>> {
        self.get_scalar("getArchivedStorage").await
    }

    async fn get_total_amount_of_contracts(&self) -> Result<Option<NumberOrString>> {
        self.get_scalar("getTotalAmountOfContracts").await
    }

    async fn get_total_amount_of_coins(&self) -> Result<Option<NumberOrString>> {
        self.get_scalar("getTotalAmountOfCoins").await
    }

    async fn get_total_amount_of_files(&self) -> Result<Option<NumberOrString>> {
        self.get_scalar("getTotalAmountOfFiles").await
    }

    async fn get_mined_coins(&self) -> Result<MinedCoins> {
        Ok(self.get_json("getMinedCoins", &[]).await?.unwrap_or_default())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String> {
        self.post_json("transactions", transaction, "Transaction accepted")
            .await
    }

    async fn send_block(&self, block: &Block) -> Result<String> {
        self.post_json("blocks", block, "Block accepted").await
    }

    async fn archive_file(
        &self,
        file: &serde_json::Value,
        data: &serde_json::Value,
    ) -> Result<String> {
        self.post_json("archive", &archive_payload(file, data), "File archived successfully")
            .await
    }

    async fn retrieve_file(&self, filename: &str) -> Result<RetrievedFile> {
        let url = format!(
            "{}/storage/retrieveFile",
            self.config.storage_url.trim_end_matches('/')
        );
        debug!(url = %url, filename, "Retrieving file");

        let response = self
            .http
            .get(&url)
            .query(&[("filename", filename)])
            .send()
            .await
            .inspect_err(|e| error!(filename, error = %e, "File request failed"))?;

        if let Some(e) = status_error("retrieveFile", response.status()) {
            return Err(e);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(RetrievedFile {
            file_name: filename.to_string(),
            content_type,
            bytes,
        })
    }
}
