use std::fmt;

/// Normalized identity of a navigable location.
///
/// Query and fragment are dropped, repeated slashes collapse, and a
/// trailing slash is removed except on the root, so `/chat-history/?page=2`
/// and `/chat-history` share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let mut normalized = String::with_capacity(path.len() + 1);
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteKey {
    fn from(location: &str) -> Self {
        Self::from_location(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            RouteKey::from_location("/chat-history?page=2#top").as_str(),
            "/chat-history"
        );
        assert_eq!(RouteKey::from_location("/a#frag?x").as_str(), "/a");
    }

    #[test]
    fn trailing_and_repeated_slashes() {
        assert_eq!(RouteKey::from_location("/dashboard/").as_str(), "/dashboard");
        assert_eq!(
            RouteKey::from_location("//bots///42//").as_str(),
            "/bots/42"
        );
    }

    #[test]
    fn empty_and_root_become_root() {
        assert_eq!(RouteKey::from_location("").as_str(), "/");
        assert_eq!(RouteKey::from_location("/").as_str(), "/");
        assert_eq!(RouteKey::from_location("?q=1").as_str(), "/");
    }

    #[test]
    fn missing_leading_slash_is_added() {
        assert_eq!(RouteKey::from_location("settings").as_str(), "/settings");
    }
}
