use secrecy::{ExposeSecret, SecretString};

/// Where the REST API administrator token travels on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPlacement {
    /// `Authorization: Bearer <token>` header (FortiOS 5.6.6+).
    #[default]
    Header,
    /// `access_token=<token>` query parameter, for older firmware.
    Query,
}

/// Credentials for authenticating with a FortiGate.
///
/// FortiOS REST API administrators authenticate with a single static token,
/// generated under System > Administrators > REST API Admin.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: SecretString,
    placement: TokenPlacement,
}

impl Credentials {
    /// Token credentials sent in the `Authorization` header.
    pub fn api_token(token: SecretString) -> Self {
        Self {
            token,
            placement: TokenPlacement::Header,
        }
    }

    /// Override where the token is placed on the request.
    pub fn with_placement(mut self, placement: TokenPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> TokenPlacement {
        self.placement
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    pub(crate) fn token(&self) -> &str {
        self.token.expose_secret()
    }
}
