use std::time::Duration;

use url::Url;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin serving the `/activities` API.
    pub base_url: Url,
    /// How long a notice stays visible.
    pub notice_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            notice_timeout: DEFAULT_NOTICE_TIMEOUT,
        })
    }

    pub fn with_notice_timeout(mut self, notice_timeout: Duration) -> Self {
        self.notice_timeout = notice_timeout;
        self
    }

    /// `{base}/activities`
    pub fn activities_url(&self) -> Result<Url> {
        self.endpoint(&[])
    }

    /// `{base}/activities/{activity}/{action}?email={email}`, with the
    /// activity segment and email query value percent-encoded.
    pub fn enrollment_url(&self, activity: &str, action: &str, email: &str) -> Result<Url> {
        let mut url = self.endpoint(&[activity, action])?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("activities")
            .extend(segments);
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            notice_timeout: DEFAULT_NOTICE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activities_url_joins_base() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(
            config.activities_url().unwrap().as_str(),
            "http://localhost:8000/activities"
        );
    }

    #[test]
    fn enrollment_url_is_percent_encoded() {
        let config = ClientConfig::default();
        let url = config
            .enrollment_url("Chess Club/Advanced", "signup", "a+b@x.com")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club%2FAdvanced/signup?email=a%2Bb%40x.com"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let config = ClientConfig::new("https://school.example/board/").unwrap();
        assert_eq!(
            config.enrollment_url("Art", "unregister", "x@y.z").unwrap().as_str(),
            "https://school.example/board/activities/Art/unregister?email=x%40y.z"
        );
    }
}
