use url::Url;

use crate::config::FeedConfig;
use crate::utils::visitor::Visitor;

/// Parameters for one offer feed lookup. Built per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamOfferQuery<'a> {
    pub user_id: &'a str,
    pub api_key: &'a str,
    pub s1: &'a str,
    pub ip: &'a str,
    pub user_agent: &'a str,
}

impl<'a> UpstreamOfferQuery<'a> {
    pub fn new(config: &'a FeedConfig, visitor: &'a Visitor) -> Self {
        Self {
            user_id: &config.user_id,
            api_key: &config.api_key,
            s1: &config.tracking_tag,
            ip: &visitor.ip,
            user_agent: &visitor.user_agent,
        }
    }

    /// Appends the parameters to `base`, keeping any query it already has.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("user_id", self.user_id)
            .append_pair("api_key", self.api_key)
            .append_pair("s1", self.s1)
            .append_pair("ip", self.ip)
            .append_pair("user_agent", self.user_agent);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base: &str) -> FeedConfig {
        FeedConfig {
            base_url: Url::parse(base).unwrap(),
            user_id: "4821".into(),
            api_key: "k-123".into(),
            tracking_tag: "landing-a".into(),
            timeout: Duration::from_secs(8),
        }
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn builds_all_parameters_in_order() {
        let config = config("https://feed.example.com/public/offers/feed.php");
        let visitor = Visitor {
            ip: "203.0.113.9".into(),
            user_agent: "Mozilla/5.0".into(),
        };
        let url = UpstreamOfferQuery::new(&config, &visitor).to_url(&config.base_url);

        assert_eq!(url.path(), "/public/offers/feed.php");
        assert_eq!(
            pairs(&url),
            vec![
                ("user_id".to_string(), "4821".to_string()),
                ("api_key".to_string(), "k-123".to_string()),
                ("s1".to_string(), "landing-a".to_string()),
                ("ip".to_string(), "203.0.113.9".to_string()),
                ("user_agent".to_string(), "Mozilla/5.0".to_string()),
            ]
        );
    }

    #[test]
    fn keeps_existing_query() {
        let config = config("https://feed.example.com/offers?format=json");
        let visitor = Visitor::default();
        let url = UpstreamOfferQuery::new(&config, &visitor).to_url(&config.base_url);
        let pairs = pairs(&url);
        assert_eq!(pairs[0], ("format".to_string(), "json".to_string()));
        assert_eq!(pairs[4], ("ip".to_string(), "127.0.0.1".to_string()));
        assert_eq!(pairs[5], ("user_agent".to_string(), "OfferProxy/1.0".to_string()));
        assert_eq!(pairs.len(), 6);
    }

    #[test]
    fn encodes_unsafe_visitor_values() {
        let config = config("https://feed.example.com/offers");
        let visitor = Visitor {
            ip: "::1&api_key=stolen".into(),
            user_agent: "Agent/1.0 (x; y) #frag ünï €".into(),
        };
        let url = UpstreamOfferQuery::new(&config, &visitor).to_url(&config.base_url);

        assert!(url.fragment().is_none());
        assert!(!url.query().unwrap().contains(' '));
        let pairs = pairs(&url);
        assert_eq!(pairs.iter().filter(|(k, _)| k == "api_key").count(), 1);
        assert_eq!(pairs[3].1, "::1&api_key=stolen");
        assert_eq!(pairs[4].1, "Agent/1.0 (x; y) #frag ünï €");
    }
}
