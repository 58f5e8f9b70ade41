//! Deezer OAuth helpers.
//!
//! Deezer's connect endpoints are not part of the REST API: the login URL is
//! opened by the user's browser, and the token exchange answers either with
//! JSON or with the plain text body `wrong code`.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::Transport;
use crate::error::{DeezerError, Result};

/// Raw body returned by the token endpoint for an unknown or reused code.
pub const WRONG_CODE_BODY: &str = "wrong code";

/// Permissions requested by the login URL.
const PERMS: &str = "basic_access,email";

/// Outcome of exchanging an authorization code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthToken {
    /// The code was accepted.
    Granted {
        /// Token to pass to [`Deezer::new`](crate::Deezer::new).
        access_token: String,
        /// Lifetime in seconds; `0` or absent means the token does not expire.
        expires: Option<u64>,
    },
    /// Deezer rejected the code.
    WrongCode,
}

impl OAuthToken {
    /// The access token, if the exchange succeeded.
    pub fn access_token(&self) -> Option<&str> {
        match self {
            OAuthToken::Granted { access_token, .. } => Some(access_token.as_str()),
            OAuthToken::WrongCode => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    expires: Option<u64>,
}

// Deezer sends `expires` as a number or as a numeric string.
fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Build the URL the user opens to grant access.
///
/// Inputs are inserted as given, without percent-encoding.
pub fn login_url(connect_url: &str, app_id: &str, redirect_uri: &str) -> String {
    format!(
        "{}/auth.php?app_id={}&redirect_uri={}&perms={}",
        connect_url, app_id, redirect_uri, PERMS
    )
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(
    transport: &dyn Transport,
    connect_url: &str,
    app_id: &str,
    app_secret: &str,
    code: &str,
) -> Result<OAuthToken> {
    let url = format!("{}/access_token.php", connect_url);
    debug!("Exchanging OAuth code for app {}", app_id);

    let body = transport
        .get(
            &url,
            &[
                ("app_id", app_id),
                ("secret", app_secret),
                ("code", code),
                ("output", "json"),
            ],
        )
        .await?;

    parse_token_body(&body)
}

fn parse_token_body(body: &str) -> Result<OAuthToken> {
    if body == WRONG_CODE_BODY {
        warn!("Deezer rejected the OAuth code");
        return Ok(OAuthToken::WrongCode);
    }

    let json: Value = serde_json::from_str(body)?;
    let token: TokenResponse =
        serde_json::from_value(json).map_err(|e| DeezerError::malformed("oauth token", e))?;

    Ok(OAuthToken::Granted {
        access_token: token.access_token,
        expires: token.expires,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::config::DEFAULT_CONNECT_URL;

    #[test]
    fn test_login_url_exact() {
        assert_eq!(
            login_url(DEFAULT_CONNECT_URL, "APPID", "https://x/cb"),
            "https://connect.deezer.com/oauth/auth.php?app_id=APPID&redirect_uri=https://x/cb&perms=basic_access,email"
        );
    }

    #[tokio::test]
    async fn test_wrong_code() {
        let mock = MockTransport::new().route(
            "https://connect.deezer.com/oauth/access_token.php",
            "wrong code",
        );
        let token = exchange_code(&mock, DEFAULT_CONNECT_URL, "1", "s", "bad")
            .await
            .unwrap();
        assert_eq!(token, OAuthToken::WrongCode);
        assert_eq!(token.access_token(), None);
    }

    #[tokio::test]
    async fn test_granted_token_and_query() {
        let mock = MockTransport::new().route(
            "https://connect.deezer.com/oauth/access_token.php",
            r#"{"access_token":"frXYZ","expires":"3600"}"#,
        );
        let token = exchange_code(&mock, DEFAULT_CONNECT_URL, "42", "shh", "c0de")
            .await
            .unwrap();
        assert_eq!(
            token,
            OAuthToken::Granted {
                access_token: "frXYZ".to_string(),
                expires: Some(3600),
            }
        );

        let call = &mock.calls()[0];
        assert!(call.query.contains(&("code".to_string(), "c0de".to_string())));
        assert!(call.query.contains(&("secret".to_string(), "shh".to_string())));
        assert!(call.query.contains(&("output".to_string(), "json".to_string())));
    }

    #[test]
    fn test_missing_access_token_is_malformed() {
        let err = parse_token_body(r#"{"expires":0}"#).unwrap_err();
        assert!(matches!(err, DeezerError::MalformedResponse { .. }));
    }

    #[test]
    fn test_non_json_body_is_parse_error() {
        let err = parse_token_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, DeezerError::ParseError(_)));
    }
}
