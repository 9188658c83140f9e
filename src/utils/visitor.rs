/// Client IP header injected by the Cloudflare edge.
pub const CLIENT_IP_HEADER: &str = "CF-Connecting-IP";

pub const DEFAULT_IP: &str = "127.0.0.1";
pub const DEFAULT_USER_AGENT: &str = "OfferProxy/1.0";

/// Who the offer is being requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct Visitor {
    pub ip: String,
    pub user_agent: String,
}

impl Visitor {
    /// Reads both values off the inbound request, falling back to defaults.
    pub fn from_request(req: &worker::Request) -> worker::Result<Self> {
        let headers = req.headers();
        Ok(Self::from_parts(
            headers.get(CLIENT_IP_HEADER)?,
            headers.get("User-Agent")?,
        ))
    }

    /// Blank header values count as absent.
    pub fn from_parts(ip: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip: non_blank(ip).unwrap_or_else(|| DEFAULT_IP.to_string()),
            user_agent: non_blank(user_agent).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl Default for Visitor {
    fn default() -> Self {
        Self::from_parts(None, None)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_header_values() {
        let visitor = Visitor::from_parts(
            Some("198.51.100.7".into()),
            Some("Mozilla/5.0 (iPhone)".into()),
        );
        assert_eq!(visitor.ip, "198.51.100.7");
        assert_eq!(visitor.user_agent, "Mozilla/5.0 (iPhone)");
    }

    #[test]
    fn missing_headers_get_defaults() {
        let visitor = Visitor::from_parts(None, None);
        assert_eq!(visitor.ip, "127.0.0.1");
        assert_eq!(visitor.user_agent, "OfferProxy/1.0");
        assert_eq!(visitor, Visitor::default());
    }

    #[test]
    fn blank_headers_get_defaults() {
        let visitor = Visitor::from_parts(Some("  ".into()), Some(String::new()));
        assert_eq!(visitor.ip, DEFAULT_IP);
        assert_eq!(visitor.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn trims_whitespace() {
        let visitor = Visitor::from_parts(Some(" 2001:db8::1 ".into()), None);
        assert_eq!(visitor.ip, "2001:db8::1");
    }
}
