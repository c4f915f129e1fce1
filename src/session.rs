//! A live session against the merge service.
//!
//! [`Session`] owns the local [`FileStore`] and a [`ServiceClient`] and is
//! the only place where the two meet. Order-mutating operations follow one
//! shape: mutate the local list optimistically, push the mutation to the
//! service, and adopt the service's acknowledged list as authoritative.
//!
//! All mutating methods take `&mut self`, so two order-mutating operations
//! can never interleave on one session. On top of that, every reorder push
//! carries a monotonic sequence number and a reconciliation older than the
//! last applied one is discarded, so responses can never be applied out of
//! the order their requests were issued in.

use std::path::Path;

use crate::client::ServiceClient;
use crate::error::{Error, Result};
use crate::ordering;
use crate::protocol::ServiceOutput;
use crate::selection::Selection;
use crate::store::{FileDescriptor, FileStore, StoreStats};

/// Outcome of a batch removal.
///
/// Server-side deletes are best-effort: a failed delete leaves an orphan on
/// the server but never blocks local removal. Failures are collected here
/// instead of being dropped silently.
#[derive(Debug, Default)]
pub struct RemovalReport {
    /// Descriptors removed from the local list, in removal order.
    pub removed: Vec<FileDescriptor>,
    /// Server paths whose remote delete failed, with the failure message.
    pub failed_deletes: Vec<(String, String)>,
}

impl RemovalReport {
    /// Check whether every remote delete went through.
    pub fn is_clean(&self) -> bool {
        self.failed_deletes.is_empty()
    }
}

/// Client-side session state: the ordered file list plus the means to keep
/// it consistent with the service.
#[derive(Debug)]
pub struct Session {
    store: FileStore,
    client: ServiceClient,
    /// Sequence number of the most recently issued reorder push.
    issued_seq: u64,
    /// Sequence number of the most recently applied reconciliation.
    applied_seq: u64,
}

impl Session {
    /// Start an empty session using the given client.
    pub fn new(client: ServiceClient) -> Self {
        Self {
            store: FileStore::new(),
            client,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    /// The current file list, in merge order.
    pub fn files(&self) -> &[FileDescriptor] {
        self.store.files()
    }

    /// Number of files in the list.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// File and page totals for display.
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// The client this session talks through.
    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Upload one local file and append the descriptors the service
    /// registered, in response order.
    ///
    /// Returns the number of descriptors appended.
    pub async fn upload(&mut self, local: &Path) -> Result<usize> {
        let descriptors = self.client.upload(local).await?;
        let count = descriptors.len();
        for descriptor in descriptors {
            self.store.append(descriptor)?;
        }
        Ok(count)
    }

    /// Move the selected files up by one position.
    ///
    /// Returns `false` without any network call when nothing can move.
    /// On success the service's acknowledged order is adopted; if the push
    /// fails the optimistic local move is rolled back.
    pub async fn move_up(&mut self, selection: &Selection) -> Result<bool> {
        let swaps = ordering::plan_move_up(selection, self.store.len())?;
        self.apply_and_push(&swaps).await
    }

    /// Move the selected files down by one position.
    ///
    /// Same contract as [`Session::move_up`].
    pub async fn move_down(&mut self, selection: &Selection) -> Result<bool> {
        let swaps = ordering::plan_move_down(selection, self.store.len())?;
        self.apply_and_push(&swaps).await
    }

    /// Remove the selected files, highest index first.
    ///
    /// Each removal notifies the service; a failed notification is recorded
    /// in the report and the local entry is removed regardless.
    pub async fn remove_selected(&mut self, selection: &Selection) -> Result<RemovalReport> {
        let order = ordering::removal_order(selection, self.store.len())?;
        let mut report = RemovalReport::default();
        for index in order {
            let path = self.store.files()[index].path.clone();
            if let Err(err) = self.client.delete_file(&path).await {
                tracing::warn!(%path, error = %err, "remote delete failed, removing locally anyway");
                report.failed_deletes.push((path, err.to_string()));
            }
            report.removed.push(self.store.remove_at(index)?);
        }
        Ok(report)
    }

    /// Remove every file, locally and on the service.
    ///
    /// The local list is cleared only after the service confirms; on any
    /// failure it is left untouched.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.client.clear_all().await?;
        self.store.replace_all(Vec::new())?;
        Ok(())
    }

    /// Merge the current list into a single document, in list order.
    ///
    /// # Errors
    ///
    /// [`Error::NoFilesToMerge`] when the list is empty, checked before any
    /// network call.
    pub async fn merge(&self) -> Result<ServiceOutput> {
        if self.store.is_empty() {
            return Err(Error::NoFilesToMerge);
        }
        self.client.merge(self.store.files()).await
    }

    /// Apply a planned move and push the resulting order to the service.
    async fn apply_and_push(&mut self, swaps: &[ordering::Swap]) -> Result<bool> {
        if swaps.is_empty() {
            return Ok(false);
        }
        ordering::apply_swaps(&mut self.store, swaps)?;

        self.issued_seq += 1;
        let seq = self.issued_seq;
        match self.client.reorder(self.store.files()).await {
            Ok(files) => {
                self.reconcile(seq, files)?;
                Ok(true)
            }
            Err(err) => {
                // The push never took effect; undo the optimistic move so
                // the local list matches what the service last acknowledged.
                ordering::revert_swaps(&mut self.store, swaps)?;
                Err(err)
            }
        }
    }

    /// Adopt a server-acknowledged list, unless a newer one already landed.
    fn reconcile(&mut self, seq: u64, files: Vec<FileDescriptor>) -> Result<()> {
        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "discarding stale reorder response");
            return Ok(());
        }
        self.store.replace_all(files)?;
        self.applied_seq = seq;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn reconcile_for_test(&mut self, seq: u64, files: Vec<FileDescriptor>) -> Result<()> {
        self.reconcile(seq, files)
    }

    #[cfg(test)]
    pub(crate) fn seed_for_test(&mut self, files: Vec<FileDescriptor>) {
        self.store.replace_all(files).unwrap();
    }
}
