use bytes::Bytes;

/// Decoded contact photo, as handed back by the photo loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoData {
    pub bytes: Bytes,
}

impl PhotoData {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Directory entry resolved for a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerInfo {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub contact_exists: bool,
    pub contact_display_photo_uri: Option<String>,
    pub should_send_to_voicemail: bool,
    pub cached_photo: Option<PhotoData>,
}

impl CallerInfo {
    /// Result reported when the directory has nothing, or the query failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_photo(mut self, photo: Option<PhotoData>) -> Self {
        self.cached_photo = photo;
        self
    }

    pub fn has_photo_uri(&self) -> bool {
        self.contact_display_photo_uri
            .as_deref()
            .is_some_and(|uri| !uri.is_empty())
    }
}

impl std::fmt::Display for CallerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the name or number; they end up in logs.
        write!(
            f,
            "CallerInfo(contact_exists={}, has_name={}, photo_uri={}, send_to_voicemail={}, photo={})",
            self.contact_exists,
            self.name.is_some(),
            self.has_photo_uri(),
            self.should_send_to_voicemail,
            self.cached_photo.is_some()
        )
    }
}
