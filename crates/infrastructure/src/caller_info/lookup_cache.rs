use callguard_application::ports::{
    CallerInfoListener, CallerInfoLookupPort, DirectoryQueryPort, PhotoLoaderPort,
};
use callguard_domain::{CallerAddress, CallerInfo, PhotoData};
use dashmap::DashMap;
use futures::FutureExt;
use rustc_hash::FxBuildHasher;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

type PendingTable = DashMap<CallerAddress, PendingLookup, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupPhase {
    InfoPending,
    PhotoPending,
    /// Final results are being delivered; the entry goes away right after.
    Complete,
}

/// A registered listener. `delivery` is held for the whole of each callback,
/// so one listener never runs two callbacks at once.
struct Subscriber {
    listener: Arc<dyn CallerInfoListener>,
    delivery: Mutex<()>,
}

impl Subscriber {
    fn new(listener: Arc<dyn CallerInfoListener>) -> Arc<Self> {
        Arc::new(Self {
            listener,
            delivery: Mutex::new(()),
        })
    }

    fn hold(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn info(&self, handle: &CallerAddress, info: &CallerInfo) {
        let _held = self.hold();
        self.listener.on_caller_info_query_complete(handle, info);
    }

    fn photo(&self, handle: &CallerAddress, info: &CallerInfo) {
        let _held = self.hold();
        self.listener.on_contact_photo_query_complete(handle, info);
    }
}

/// In-flight state for one caller address.
struct PendingLookup {
    token: u64,
    phase: LookupPhase,
    subscribers: Vec<Arc<Subscriber>>,
    caller_info: Option<CallerInfo>,
    /// Info carrying the photo result, once the photo stage has finished.
    completed: Option<CallerInfo>,
}

enum LookupEvent {
    InfoReady {
        handle: CallerAddress,
        token: u64,
        info: CallerInfo,
    },
    PhotoReady {
        handle: CallerAddress,
        token: u64,
        photo: Option<PhotoData>,
    },
}

enum Registration<'a> {
    Started(u64),
    Joined,
    InfoReady {
        info: CallerInfo,
        held: MutexGuard<'a, ()>,
    },
    Complete {
        info: CallerInfo,
        photo: Option<CallerInfo>,
    },
}

/// Coalesces caller lookups by address and fans each result out to every
/// listener that asked for it.
///
/// Registration may happen from any thread, including threads outside the
/// runtime. Adapter replies are funnelled through one dispatch task, which
/// is the only place entries change phase or get removed. An entry
/// disappears only after every listener has seen the info and, when the
/// contact has a photo URI, the photo.
pub struct CallerInfoLookupCache {
    pending: Arc<PendingTable>,
    events: mpsc::UnboundedSender<LookupEvent>,
    directory: Arc<dyn DirectoryQueryPort>,
    tokens: Arc<AtomicU64>,
    runtime: Handle,
}

impl CallerInfoLookupCache {
    /// Binds the cache to the current Tokio runtime, so this must be called
    /// from inside one. Adapter work always runs on that runtime.
    pub fn new(directory: Arc<dyn DirectoryQueryPort>, photos: Arc<dyn PhotoLoaderPort>) -> Self {
        let runtime = Handle::current();
        let pending: Arc<PendingTable> = Arc::new(DashMap::with_hasher(FxBuildHasher));
        let tokens = Arc::new(AtomicU64::new(1));
        let (events, rx) = mpsc::unbounded_channel();

        let dispatcher = LookupDispatcher {
            pending: Arc::clone(&pending),
            photos,
            events: events.downgrade(),
            tokens: Arc::clone(&tokens),
            runtime: runtime.clone(),
        };
        runtime.spawn(dispatcher.run(rx));

        Self {
            pending,
            events,
            directory,
            tokens,
            runtime,
        }
    }

    /// Addresses with a lookup still in flight. An entry counts until its
    /// last phase has been delivered to every listener.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: &CallerAddress) -> bool {
        self.pending.contains_key(handle)
    }

    fn spawn_info_query(&self, handle: CallerAddress, token: u64) {
        let directory = Arc::clone(&self.directory);
        let events = self.events.clone();

        self.runtime.spawn(async move {
            let info = match AssertUnwindSafe(directory.query_caller_info(&handle))
                .catch_unwind()
                .await
            {
                Ok(Ok(info)) => info,
                Ok(Err(e)) => {
                    warn!(error = %e, token, "Caller info query failed; reporting empty info");
                    CallerInfo::empty()
                }
                Err(_) => {
                    warn!(token, "Caller info query panicked; reporting empty info");
                    CallerInfo::empty()
                }
            };
            let _ = events.send(LookupEvent::InfoReady {
                handle,
                token,
                info,
            });
        });
    }
}

impl CallerInfoLookupPort for CallerInfoLookupCache {
    fn start_lookup(&self, handle: &CallerAddress, listener: Arc<dyn CallerInfoListener>) -> bool {
        if handle.is_empty() {
            debug!("Skipping caller info lookup for an address without a number");
            return false;
        }

        let subscriber = Subscriber::new(listener);
        let registration = match self.pending.entry(handle.clone()) {
            dashmap::Entry::Occupied(mut e) => {
                let entry = e.get_mut();
                match entry.phase {
                    LookupPhase::InfoPending => {
                        entry.subscribers.push(Arc::clone(&subscriber));
                        Registration::Joined
                    }
                    LookupPhase::PhotoPending => {
                        // Taken under the shard lock: the photo cannot be
                        // delivered to this subscriber before its info.
                        let held = subscriber.hold();
                        entry.subscribers.push(Arc::clone(&subscriber));
                        Registration::InfoReady {
                            info: entry.caller_info.clone().unwrap_or_else(CallerInfo::empty),
                            held,
                        }
                    }
                    LookupPhase::Complete => Registration::Complete {
                        info: entry.caller_info.clone().unwrap_or_else(CallerInfo::empty),
                        photo: entry.completed.clone(),
                    },
                }
            }
            dashmap::Entry::Vacant(e) => {
                let token = self.tokens.fetch_add(1, Ordering::Relaxed);
                e.insert(PendingLookup {
                    token,
                    phase: LookupPhase::InfoPending,
                    subscribers: vec![Arc::clone(&subscriber)],
                    caller_info: None,
                    completed: None,
                });
                Registration::Started(token)
            }
        };

        match registration {
            Registration::Started(token) => {
                debug!(token, "Starting caller info query");
                self.spawn_info_query(handle.clone(), token);
            }
            Registration::Joined => {
                debug!("Caller info query already in flight; joined");
            }
            Registration::InfoReady { info, held } => {
                debug!("Caller info already known; waiting for photo");
                subscriber
                    .listener
                    .on_caller_info_query_complete(handle, &info);
                drop(held);
            }
            Registration::Complete { info, photo } => {
                debug!("Caller info lookup finishing; delivering results directly");
                subscriber.info(handle, &info);
                if let Some(photo) = photo {
                    subscriber.photo(handle, &photo);
                }
            }
        }

        true
    }
}

struct LookupDispatcher {
    pending: Arc<PendingTable>,
    photos: Arc<dyn PhotoLoaderPort>,
    events: mpsc::WeakUnboundedSender<LookupEvent>,
    tokens: Arc<AtomicU64>,
    runtime: Handle,
}

impl LookupDispatcher {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<LookupEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                LookupEvent::InfoReady {
                    handle,
                    token,
                    info,
                } => self.on_info_ready(handle, token, info),
                LookupEvent::PhotoReady {
                    handle,
                    token,
                    photo,
                } => self.on_photo_ready(handle, token, photo),
            }
        }
        debug!("Caller info dispatcher stopped");
    }

    fn on_info_ready(&self, handle: CallerAddress, token: u64, info: CallerInfo) {
        let (subscribers, photo_request) = match self.pending.get_mut(&handle) {
            Some(mut entry) if entry.token == token && entry.phase == LookupPhase::InfoPending => {
                entry.caller_info = Some(info.clone());
                match info.contact_display_photo_uri.clone().filter(|u| !u.is_empty()) {
                    Some(uri) => {
                        let photo_token = self.tokens.fetch_add(1, Ordering::Relaxed);
                        entry.token = photo_token;
                        entry.phase = LookupPhase::PhotoPending;
                        (entry.subscribers.clone(), Some((uri, photo_token)))
                    }
                    None => {
                        entry.phase = LookupPhase::Complete;
                        (std::mem::take(&mut entry.subscribers), None)
                    }
                }
            }
            _ => {
                debug!(token, "Stale caller info reply; ignoring");
                return;
            }
        };

        debug!(token, listeners = subscribers.len(), %info, "Caller info ready");
        for subscriber in &subscribers {
            subscriber.info(&handle, &info);
        }

        match photo_request {
            Some((uri, photo_token)) => self.spawn_photo_load(handle, photo_token, uri),
            None => self.finish(&handle, token),
        }
    }

    fn on_photo_ready(&self, handle: CallerAddress, token: u64, photo: Option<PhotoData>) {
        let (subscribers, info) = match self.pending.get_mut(&handle) {
            Some(mut entry) if entry.token == token && entry.phase == LookupPhase::PhotoPending => {
                let info = entry
                    .caller_info
                    .clone()
                    .unwrap_or_else(CallerInfo::empty)
                    .with_photo(photo);
                entry.phase = LookupPhase::Complete;
                entry.completed = Some(info.clone());
                (std::mem::take(&mut entry.subscribers), info)
            }
            _ => {
                debug!(token, "Stale contact photo reply; ignoring");
                return;
            }
        };

        debug!(
            token,
            listeners = subscribers.len(),
            has_photo = info.cached_photo.is_some(),
            "Contact photo ready"
        );
        for subscriber in &subscribers {
            subscriber.photo(&handle, &info);
        }

        self.finish(&handle, token);
    }

    fn finish(&self, handle: &CallerAddress, token: u64) {
        self.pending.remove_if(handle, |_, entry| {
            entry.token == token && entry.phase == LookupPhase::Complete
        });
    }

    fn spawn_photo_load(&self, handle: CallerAddress, token: u64, uri: String) {
        let Some(events) = self.events.upgrade() else {
            debug!(token, "Lookup cache dropped; skipping photo load");
            return;
        };
        let photos = Arc::clone(&self.photos);

        self.runtime.spawn(async move {
            let photo = match AssertUnwindSafe(photos.load_photo(&uri)).catch_unwind().await {
                Ok(Ok(photo)) => Some(photo),
                Ok(Err(e)) => {
                    warn!(error = %e, token, "Contact photo load failed");
                    None
                }
                Err(_) => {
                    warn!(token, "Contact photo load panicked");
                    None
                }
            };
            let _ = events.send(LookupEvent::PhotoReady {
                handle,
                token,
                photo,
            });
        });
    }
}
