//! Hubic transfer manager.
//!
//! Maps repository files onto object paths and turns the status codes of the
//! object store into transfer outcomes:
//!
//! | Operation | Accepted statuses |
//! |---|---|
//! | upload | 201 |
//! | download | 200 |
//! | move: copy | 201 |
//! | move: delete source | 200, 204 |
//! | delete | 200, 204, 404 |
//! | list | 200 |
//! | init: folder markers | 2xx |

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use hubic_http::{Body, HttpResponse};
use hubic_transfer::{
    RemoteFile, RemoteFileFactory, RemoteFileType, StorageError, TransferManager,
};

use crate::client::{parse_listing, HubicClient, ListingEntry, LISTING_LIMIT};
use crate::namespace::{parent_path, remote_file_path, NAMESPACE_DIRECTORIES, REPO_ROOT};
use crate::outcome::{DeleteOutcome, Existence};

/// Object written and removed again by [`HubicTransferManager::test_target_can_write`].
pub const WRITE_PROBE_PATH: &str = "syncany-write-test";
const WRITE_PROBE_CONTENT: [u8; 3] = [0x01, 0x02, 0x03];

const UPLOAD_OK: &[u16] = &[201];
const DOWNLOAD_OK: &[u16] = &[200];
const COPY_OK: &[u16] = &[201];
const MOVE_DELETE_OK: &[u16] = &[200, 204];
const LIST_OK: &[u16] = &[200];

fn expect_status(
    operation: &str,
    response: &HttpResponse,
    accepted: &[u16],
) -> Result<(), StorageError> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        warn!(operation, status = response.status, "unexpected status");
        Err(StorageError::unexpected_status(operation, response.status))
    }
}

/// Transfer manager backed by a Hubic storage endpoint.
pub struct HubicTransferManager {
    client: HubicClient,
    listing_limit: usize,
}

impl HubicTransferManager {
    pub fn new(endpoint: &str, token: &str) -> Result<Self, StorageError> {
        let client = HubicClient::new(endpoint, token)
            .map_err(|e| StorageError::transport("create storage client", e))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: HubicClient) -> Self {
        Self {
            client,
            listing_limit: LISTING_LIMIT,
        }
    }

    /// Page size for folder listings.
    pub fn with_listing_limit(mut self, limit: usize) -> Self {
        self.listing_limit = limit.max(1);
        self
    }

    pub fn client(&self) -> &HubicClient {
        &self.client
    }

    /// Object path of a remote file: folder prefix plus name.
    pub fn remote_path(&self, remote_file: &RemoteFile) -> String {
        format!("{}{}", remote_file_path(remote_file.kind()), remote_file.name())
    }

    /// Every object under `path`, fetched page by page.
    fn list_directory(&self, path: &str) -> Result<Vec<ListingEntry>, StorageError> {
        let operation = format!("list {:?}", path);
        let mut entries = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let response = self
                .client
                .list_directory(path, marker.as_deref(), self.listing_limit)
                .map_err(|e| StorageError::transport(operation.as_str(), e))?;
            expect_status(&operation, &response, LIST_OK)?;

            let values = response.json_array().ok_or_else(|| {
                StorageError::decode(format!("listing of {:?} has no JSON array body", path))
            })?;
            let page = parse_listing(values).map_err(|e| StorageError::decode(e.to_string()))?;

            let full_page = page.len() >= self.listing_limit;
            marker = page.last().map(|entry| entry.name.clone());
            entries.extend(page);

            if !full_page || marker.is_none() {
                return Ok(entries);
            }
            debug!(path, count = entries.len(), "listing continues");
        }
    }

    fn create_directory(&self, path: &str) -> Result<(), StorageError> {
        let operation = format!("create directory {:?}", path);
        let response = self
            .client
            .create_directory(path)
            .map_err(|e| StorageError::transport(operation.as_str(), e))?;

        if response.is_success() {
            debug!(path, status = response.status, "directory ready");
            Ok(())
        } else {
            Err(StorageError::unexpected_status(operation, response.status))
        }
    }

    /// Delete a remote file and report what the store said.
    ///
    /// Only transport failures are errors; every status maps to an outcome.
    pub fn delete_outcome(&self, remote_file: &RemoteFile) -> Result<DeleteOutcome, StorageError> {
        let path = self.remote_path(remote_file);
        let response = self
            .client
            .delete(&path)
            .map_err(|e| StorageError::transport(format!("delete {}", path), e))?;

        let outcome = DeleteOutcome::from_status(response.status);
        match outcome {
            DeleteOutcome::Deleted => debug!(path, "deleted"),
            DeleteOutcome::AlreadyAbsent => debug!(path, "already absent"),
            DeleteOutcome::Failed { status } => warn!(path, status, "delete refused"),
        }
        Ok(outcome)
    }

    /// Look for a file in the listing of its parent folder.
    ///
    /// A failed listing gives [`Existence::Unknown`] rather than an error.
    pub fn probe_repo_file(&self, repo_file: &RemoteFile) -> Existence {
        let path = self.remote_path(repo_file);

        match self.list_directory(parent_path(&path)) {
            Ok(entries) if entries.iter().any(|entry| entry.name == path) => Existence::Present,
            Ok(_) => Existence::Absent,
            Err(e) => {
                warn!(path, error = %e, "could not check whether file exists");
                Existence::Unknown
            }
        }
    }
}

impl TransferManager for HubicTransferManager {
    fn connect(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn disconnect(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn init(&self, create_if_required: bool, repo_file: &RemoteFile) -> Result<(), StorageError> {
        if create_if_required && !self.test_repo_file_exists(repo_file)? {
            info!("creating repository root");
            self.create_directory(REPO_ROOT)?;
        }

        for directory in NAMESPACE_DIRECTORIES {
            self.create_directory(directory)?;
        }
        info!("repository folders initialized");
        Ok(())
    }

    fn upload(&self, local_file: &Path, remote_file: &RemoteFile) -> Result<(), StorageError> {
        let path = self.remote_path(remote_file);
        let operation = format!("upload {}", path);

        let response = self
            .client
            .upload(Body::File(local_file.to_path_buf()), &path)
            .map_err(|e| StorageError::transport(operation.as_str(), e))?;
        expect_status(&operation, &response, UPLOAD_OK)?;

        debug!(local = %local_file.display(), path, "uploaded");
        Ok(())
    }

    fn download(&self, remote_file: &RemoteFile, local_file: &Path) -> Result<(), StorageError> {
        let path = self.remote_path(remote_file);
        let operation = format!("download {}", path);

        let response = self
            .client
            .download(&path, local_file)
            .map_err(|e| StorageError::transport(operation.as_str(), e))?;
        expect_status(&operation, &response, DOWNLOAD_OK)?;

        if response.file().is_none() {
            return Err(StorageError::transport(
                operation,
                format!("could not write {}", local_file.display()),
            ));
        }

        debug!(path, local = %local_file.display(), "downloaded");
        Ok(())
    }

    fn move_file(&self, source: &RemoteFile, target: &RemoteFile) -> Result<(), StorageError> {
        let source_path = self.remote_path(source);
        let target_path = self.remote_path(target);

        let operation = format!("copy {} to {}", source_path, target_path);
        let copied = self
            .client
            .copy(&source_path, &target_path)
            .map_err(|e| StorageError::transport(operation.as_str(), e))?;
        expect_status(&operation, &copied, COPY_OK)?;

        // The copy stays in place if this fails.
        let operation = format!("delete {} after copy", source_path);
        let deleted = self
            .client
            .delete(&source_path)
            .map_err(|e| StorageError::transport(operation.as_str(), e))?;
        expect_status(&operation, &deleted, MOVE_DELETE_OK)?;

        info!(source = source_path, target = target_path, "moved");
        Ok(())
    }

    fn delete(&self, remote_file: &RemoteFile) -> Result<bool, StorageError> {
        Ok(self.delete_outcome(remote_file)?.is_success())
    }

    fn list(
        &self,
        kind: RemoteFileType,
        factory: &dyn RemoteFileFactory,
    ) -> Result<HashSet<RemoteFile>, StorageError> {
        let prefix = remote_file_path(kind);
        let entries = self.list_directory(prefix)?;

        let mut remote_files = HashSet::new();
        for entry in entries.into_iter().filter(ListingEntry::is_file) {
            let name = entry
                .name
                .strip_prefix(prefix)
                .ok_or_else(|| StorageError::UnexpectedPath {
                    name: entry.name.clone(),
                    prefix: prefix.to_string(),
                })?;
            if name.is_empty() || name.contains('/') {
                warn!(name = %entry.name, %kind, "skipping nested object in listing");
                continue;
            }
            remote_files.insert(factory.create_remote_file(name)?);
        }

        debug!(%kind, count = remote_files.len(), "listed");
        Ok(remote_files)
    }

    fn get_remote_file_path(&self, kind: RemoteFileType) -> String {
        remote_file_path(kind).to_string()
    }

    /// A manager only exists once credentials were obtained.
    fn test_target_exists(&self) -> Result<bool, StorageError> {
        Ok(true)
    }

    fn test_target_can_write(&self) -> Result<bool, StorageError> {
        let response = match self
            .client
            .upload(WRITE_PROBE_CONTENT.to_vec(), WRITE_PROBE_PATH)
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "write probe failed");
                return Ok(false);
            }
        };

        if response.status != 201 {
            warn!(status = response.status, "write probe refused");
            return Ok(false);
        }

        if let Err(e) = self.client.delete(WRITE_PROBE_PATH) {
            debug!(error = %e, "could not remove write probe");
        }
        Ok(true)
    }

    fn test_target_can_create(&self) -> Result<bool, StorageError> {
        Ok(false)
    }

    fn test_repo_file_exists(&self, repo_file: &RemoteFile) -> Result<bool, StorageError> {
        Ok(self.probe_repo_file(repo_file).is_present())
    }
}
