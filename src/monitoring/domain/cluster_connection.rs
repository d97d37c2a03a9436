use std::fmt;

/// Opaque bearer credential passed through to the API server.
///
/// Debug output is redacted so the token never reaches logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "BearerToken(<empty>)")
        } else {
            write!(f, "BearerToken(<redacted>)")
        }
    }
}

/// Connection parameters for one monitored cluster.
///
/// Owned by exactly one refresh controller and edited through its command API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterConnection {
    pub api_endpoint: String,
    pub namespace: String,
    pub token: BearerToken,
}

impl ClusterConnection {
    pub fn new(
        api_endpoint: impl Into<String>,
        namespace: impl Into<String>,
        token: BearerToken,
    ) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            namespace: namespace.into(),
            token,
        }
    }

    /// A manual refresh needs an endpoint and a namespace; the token may be empty.
    pub fn is_refreshable(&self) -> bool {
        !self.api_endpoint.is_empty() && !self.namespace.is_empty()
    }

    /// Automatic refresh additionally requires a token.
    pub fn is_complete(&self) -> bool {
        self.is_refreshable() && !self.token.is_empty()
    }

    pub fn virtual_machines_url(&self) -> String {
        format!(
            "{}/apis/kubevirt.io/v1/namespaces/{}/virtualmachines",
            self.base_url(),
            urlencoding::encode(&self.namespace)
        )
    }

    pub fn volume_snapshots_url(&self) -> String {
        format!(
            "{}/apis/snapshot.storage.k8s.io/v1/namespaces/{}/volumesnapshots",
            self.base_url(),
            urlencoding::encode(&self.namespace)
        )
    }

    fn base_url(&self) -> &str {
        self.api_endpoint.trim_end_matches('/')
    }
}
