use sitemail_shared::CONTACT_PATH;

/// Directory the current page is served from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageLocation {
    #[default]
    Root,
    /// Nested `pages/` directory, one level below the site root.
    Pages,
}

impl PageLocation {
    pub fn detect(path: &str) -> Self {
        if path.contains("/pages/") {
            Self::Pages
        } else {
            Self::Root
        }
    }
}

/// Chooses the URL a form posts to, before cache busting.
pub trait EndpointResolver: Send + Sync {
    fn resolve(&self, action: Option<&str>) -> String;
}

impl<R: EndpointResolver + ?Sized> EndpointResolver for Box<R> {
    fn resolve(&self, action: Option<&str>) -> String {
        (**self).resolve(action)
    }
}

/// Uses the form's raw `action` attribute, rewritten for nested pages.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionEndpoint {
    location: PageLocation,
}

impl ActionEndpoint {
    pub fn new(location: PageLocation) -> Self {
        Self { location }
    }
}

impl EndpointResolver for ActionEndpoint {
    fn resolve(&self, action: Option<&str>) -> String {
        // An empty URL resolves to the page itself, like a form without an action.
        let Some(action) = action.filter(|action| !action.is_empty()) else {
            return String::new();
        };

        if self.location == PageLocation::Pages {
            if action == "contact.php" {
                return "../backend/contact.php".to_owned();
            }

            if action.starts_with("assets/") || action.starts_with("backend/") {
                return format!("../{action}");
            }
        }

        action.to_owned()
    }
}

/// Ignores the form and always posts to the same URL.
#[derive(Clone, Debug)]
pub struct FixedEndpoint(String);

impl FixedEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

impl Default for FixedEndpoint {
    fn default() -> Self {
        Self::new(CONTACT_PATH)
    }
}

impl EndpointResolver for FixedEndpoint {
    fn resolve(&self, _action: Option<&str>) -> String {
        self.0.to_owned()
    }
}

pub fn with_cache_buster(url: &str, timestamp_ms: i128) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={timestamp_ms}")
}

pub(crate) fn now_millis() -> i128 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
