use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc, Mutex, MutexGuard, PoisonError,
	},
};

use serde_json::Value;
use tokio::sync::watch;
use tracing::trace;

use super::key::CacheKey;

/// What the store knows about one key.
///
/// Values are kept as decoded JSON so every reader of a key, whatever its mode, decodes the
/// very same document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
	/// Last successful payload, kept across later failures and refetches.
	pub data: Option<Arc<Value>>,
	/// Error of the latest completed fetch, cleared by the next success.
	pub error: Option<Arc<Value>>,
	pub is_fetching: bool,
	/// Bumped on every completed fetch or manual write.
	pub generation: u64,
	/// Id of the most recently issued request. Completions of other requests are dropped.
	pub request: u64,
}

impl CacheEntry {
	/// A fetch has completed (or data was written) at least once.
	pub const fn is_resolved(&self) -> bool {
		self.generation > 0
	}
}

/// Handed out when a fetch is begun; its `request` id must be passed back to
/// [`QueryCache::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
	pub request: u64,
	/// Generation of the entry when the fetch began.
	pub generation: u64,
}

/// Shared query result store, passed explicitly to every [`Client`](crate::Client).
///
/// Cloning is cheap and yields a handle to the same store. The store never decides when an
/// entry becomes stale; entries only change through fetch completions or explicit
/// [`QueryCache::set`] / [`QueryCache::remove`] calls.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
	entries: Arc<Mutex<HashMap<CacheKey, watch::Sender<CacheEntry>>>>,
	/// Request ids are unique across the store, so a removed and recreated entry never
	/// accepts a completion issued for its predecessor.
	last_request: Arc<AtomicU64>,
}

impl QueryCache {
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, watch::Sender<CacheEntry>>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
		self.lock().get(key).map(|tx| tx.borrow().clone())
	}

	pub fn contains(&self, key: &CacheKey) -> bool {
		self.lock().contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	pub fn keys(&self) -> Vec<CacheKey> {
		self.lock().keys().cloned().collect()
	}

	/// Receiver notified on every change of `key`, creating an empty entry if needed.
	pub fn subscribe(&self, key: &CacheKey) -> watch::Receiver<CacheEntry> {
		Self::sender(&mut self.lock(), key).subscribe()
	}

	fn next_request(&self) -> u64 {
		self.last_request.fetch_add(1, Ordering::Relaxed) + 1
	}

	fn sender<'a>(
		entries: &'a mut HashMap<CacheKey, watch::Sender<CacheEntry>>,
		key: &CacheKey,
	) -> &'a watch::Sender<CacheEntry> {
		entries
			.entry(key.clone())
			.or_insert_with(|| watch::channel(CacheEntry::default()).0)
	}

	/// Marks `key` as fetching. Returns `None` when a fetch is already in flight, in which
	/// case the caller must wait for that one instead of issuing its own request.
	pub fn try_begin(&self, key: &CacheKey) -> Option<FetchTicket> {
		let request = self.next_request();
		let mut entries = self.lock();
		let mut ticket = None;

		Self::sender(&mut entries, key).send_if_modified(|entry| {
			if entry.is_fetching {
				false
			} else {
				ticket = Some(issue(entry, request));
				true
			}
		});

		ticket
	}

	/// Marks `key` as fetching even if a fetch is in flight. The in-flight request is
	/// superseded: its completion will be dropped.
	pub fn begin_forced(&self, key: &CacheKey) -> FetchTicket {
		let request = self.next_request();
		let mut entries = self.lock();
		let mut ticket = FetchTicket {
			request,
			generation: 0,
		};

		Self::sender(&mut entries, key).send_modify(|entry| ticket = issue(entry, request));

		ticket
	}

	/// Records the outcome of request `request` on `key`. Returns `false`, leaving the
	/// entry untouched, when that request has been superseded or the entry was removed.
	pub fn complete(&self, key: &CacheKey, request: u64, outcome: Result<Value, Value>) -> bool {
		let entries = self.lock();
		let Some(tx) = entries.get(key) else {
			trace!(%key, request, "Dropped completion for removed entry");
			return false;
		};

		let accepted = tx.send_if_modified(|entry| {
			if entry.request != request || !entry.is_fetching {
				return false;
			}

			entry.is_fetching = false;
			entry.generation += 1;
			match outcome {
				Ok(data) => {
					entry.data = Some(Arc::new(data));
					entry.error = None;
				}
				Err(error) => entry.error = Some(Arc::new(error)),
			}
			true
		});

		if accepted {
			trace!(%key, request, "Cache entry updated");
		} else {
			trace!(%key, request, "Dropped completion of superseded request");
		}

		accepted
	}

	/// Writes `data` at `key` as if a fetch had succeeded.
	pub fn set(&self, key: &CacheKey, data: Value) {
		let mut entries = self.lock();

		Self::sender(&mut entries, key).send_modify(|entry| {
			entry.generation += 1;
			entry.data = Some(Arc::new(data));
			entry.error = None;
		});
	}

	/// Drops `key`. Waiting readers see the entry reset and start a new fetch.
	pub fn remove(&self, key: &CacheKey) -> Option<CacheEntry> {
		self.lock().remove(key).map(|tx| {
			let last = tx.borrow().clone();
			tx.send_replace(CacheEntry::default());
			last
		})
	}

	pub fn clear(&self) {
		self.lock().clear();
	}
}

fn issue(entry: &mut CacheEntry, request: u64) -> FetchTicket {
	entry.is_fetching = true;
	entry.request = request;

	FetchTicket {
		request: entry.request,
		generation: entry.generation,
	}
}
