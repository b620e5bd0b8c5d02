use url::Url;

/// The location of a remote record store, and the credentials to access it
#[derive(Clone)]
pub struct Resource {
    url: Url,
    username: String,
    password: String,
}

impl Resource {
    pub fn new(url: Url, username: String, password: String) -> Self {
        Self { url, username, password }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn username(&self) -> &str { &self.username }
    pub fn password(&self) -> &str { &self.password }

    /// Build the URL of a record of this store: `<base>/<record_type>/<record_id>`
    pub fn record_url(&self, record_type: &str, record_id: &str) -> Result<Url, url::ParseError> {
        let mut base = self.url.clone();
        // Without a trailing slash, `join` would replace the last path segment
        if base.path().ends_with('/') == false {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("{}/{}", record_type, record_id))
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .finish()
    }
}
