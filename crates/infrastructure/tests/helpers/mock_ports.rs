use async_trait::async_trait;
use callguard_application::ports::{
    BlockCheckerPort, CallFilterResultCallback, CallerInfoListener, DirectoryQueryPort,
    PhotoLoaderPort, ScreeningComponent, ScreeningResponse, ScreeningServiceTransport,
    BIND_SCREENING_SERVICE_PERMISSION,
};
use callguard_domain::{Call, CallerAddress, CallerInfo, DomainError, PhotoData, Verdict};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

pub const PHOTO_URI: &str = "file:///contacts/alice.jpg";

pub fn alice() -> CallerAddress {
    CallerAddress::tel("+15551234567")
}

pub fn contact(send_to_voicemail: bool, photo_uri: Option<&str>) -> CallerInfo {
    CallerInfo {
        name: Some("Alice".to_string()),
        phone_number: Some("+15551234567".to_string()),
        contact_exists: true,
        contact_display_photo_uri: photo_uri.map(str::to_string),
        should_send_to_voicemail: send_to_voicemail,
        cached_photo: None,
    }
}

pub fn photo() -> PhotoData {
    PhotoData::new(vec![0xFFu8, 0xD8, 0xFF, 0xE0])
}

/// Closed until `release`; each waiter returns its permit on the way out.
struct Gate(Option<Semaphore>);

impl Gate {
    fn open() -> Self {
        Self(None)
    }

    fn closed() -> Self {
        Self(Some(Semaphore::new(0)))
    }

    async fn pass(&self) {
        if let Some(semaphore) = &self.0 {
            let _ = semaphore.acquire().await;
        }
    }

    fn release(&self) {
        if let Some(semaphore) = &self.0 {
            semaphore.add_permits(1);
        }
    }
}

pub struct MockDirectory {
    result: Result<CallerInfo, DomainError>,
    panic_once: AtomicBool,
    gate: Gate,
    queries: AtomicUsize,
    handles: Mutex<Vec<CallerAddress>>,
}

impl MockDirectory {
    pub fn new(info: CallerInfo) -> Self {
        Self {
            result: Ok(info),
            panic_once: AtomicBool::new(false),
            gate: Gate::open(),
            queries: AtomicUsize::new(0),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(info: CallerInfo) -> Self {
        Self {
            gate: Gate::closed(),
            ..Self::new(info)
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(DomainError::DirectoryQueryFailed("provider crashed".to_string())),
            ..Self::new(CallerInfo::empty())
        }
    }

    /// Panics on the first query, then answers with `info`.
    pub fn panicking_once(info: CallerInfo) -> Self {
        Self {
            panic_once: AtomicBool::new(true),
            ..Self::new(info)
        }
    }

    pub fn release(&self) {
        self.gate.release();
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn handles(&self) -> Vec<CallerAddress> {
        self.handles.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryQueryPort for MockDirectory {
    async fn query_caller_info(&self, handle: &CallerAddress) -> Result<CallerInfo, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.handles.lock().unwrap().push(handle.clone());
        self.gate.pass().await;
        if self.panic_once.swap(false, Ordering::SeqCst) {
            panic!("directory provider crashed");
        }
        self.result.clone()
    }
}

pub struct MockPhotoLoader {
    result: Result<PhotoData, DomainError>,
    panics: bool,
    gate: Gate,
    loads: AtomicUsize,
}

impl MockPhotoLoader {
    pub fn new(photo: PhotoData) -> Self {
        Self {
            result: Ok(photo),
            panics: false,
            gate: Gate::open(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn gated(photo: PhotoData) -> Self {
        Self {
            gate: Gate::closed(),
            ..Self::new(photo)
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(DomainError::PhotoLoadFailed("decode error".to_string())),
            ..Self::new(photo())
        }
    }

    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::new(photo())
        }
    }

    pub fn release(&self) {
        self.gate.release();
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoLoaderPort for MockPhotoLoader {
    async fn load_photo(&self, _uri: &str) -> Result<PhotoData, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        if self.panics {
            panic!("image decoder crashed");
        }
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingListener {
    infos: Mutex<Vec<CallerInfo>>,
    photos: Mutex<Vec<CallerInfo>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn infos(&self) -> Vec<CallerInfo> {
        self.infos.lock().unwrap().clone()
    }

    pub fn photos(&self) -> Vec<CallerInfo> {
        self.photos.lock().unwrap().clone()
    }
}

impl CallerInfoListener for RecordingListener {
    fn on_caller_info_query_complete(&self, _handle: &CallerAddress, info: &CallerInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }

    fn on_contact_photo_query_complete(&self, _handle: &CallerAddress, info: &CallerInfo) {
        self.photos.lock().unwrap().push(info.clone());
    }
}

pub enum BlockAnswer {
    Blocked,
    NotBlocked,
    Fails,
    Panics,
}

pub struct MockBlockChecker {
    answer: BlockAnswer,
    numbers: Mutex<Vec<String>>,
}

impl MockBlockChecker {
    pub fn new(answer: BlockAnswer) -> Self {
        Self {
            answer,
            numbers: Mutex::new(Vec::new()),
        }
    }

    pub fn numbers(&self) -> Vec<String> {
        self.numbers.lock().unwrap().clone()
    }
}

impl BlockCheckerPort for MockBlockChecker {
    fn is_blocked(&self, number: &str) -> Result<bool, DomainError> {
        self.numbers.lock().unwrap().push(number.to_string());
        match self.answer {
            BlockAnswer::Blocked => Ok(true),
            BlockAnswer::NotBlocked => Ok(false),
            BlockAnswer::Fails => Err(DomainError::BlockCheckFailed("provider gone".to_string())),
            BlockAnswer::Panics => panic!("block checker crashed"),
        }
    }
}

pub struct MockScreeningTransport {
    default_handler: Option<String>,
    component: Option<ScreeningComponent>,
    response: Result<ScreeningResponse, DomainError>,
    screened: AtomicUsize,
}

impl MockScreeningTransport {
    pub fn new(response: Result<ScreeningResponse, DomainError>) -> Self {
        Self {
            default_handler: Some("com.example.dialer".to_string()),
            component: Some(ScreeningComponent {
                package: "com.example.dialer".to_string(),
                class_name: "CallScreener".to_string(),
                permission: Some(BIND_SCREENING_SERVICE_PERMISSION.to_string()),
            }),
            response,
            screened: AtomicUsize::new(0),
        }
    }

    pub fn without_default_handler(mut self) -> Self {
        self.default_handler = None;
        self
    }

    pub fn without_component(mut self) -> Self {
        self.component = None;
        self
    }

    pub fn with_permission(mut self, permission: Option<&str>) -> Self {
        if let Some(component) = self.component.as_mut() {
            component.permission = permission.map(str::to_string);
        }
        self
    }

    pub fn screen_count(&self) -> usize {
        self.screened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScreeningServiceTransport for MockScreeningTransport {
    fn default_handler_package(&self) -> Option<String> {
        self.default_handler.clone()
    }

    fn resolve_screening_component(&self, package: &str) -> Option<ScreeningComponent> {
        self.component
            .clone()
            .filter(|component| component.package == package)
    }

    async fn screen(
        &self,
        _component: &ScreeningComponent,
        _call: &Call,
    ) -> Result<ScreeningResponse, DomainError> {
        self.screened.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

#[derive(Default)]
pub struct RecordingCallback {
    verdicts: Mutex<Vec<Verdict>>,
}

impl RecordingCallback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn verdicts(&self) -> Vec<Verdict> {
        self.verdicts.lock().unwrap().clone()
    }
}

impl CallFilterResultCallback for RecordingCallback {
    fn on_call_filtering_complete(&self, _call: &Call, verdict: Verdict) {
        self.verdicts.lock().unwrap().push(verdict);
    }
}
