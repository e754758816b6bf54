use serde::{Deserialize, Serialize};

/// A member of the fixed cluster.
///
/// `id` is cluster-unique (typically `host:port`) and `addr` is the HTTP
/// endpoint peers dial. In the static deployment model the two coincide, but
/// the rest of the code never assumes that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: String,
    pub addr: String,
}

impl Node {
    pub fn new(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        Self {
            id: addr.clone(),
            addr,
        }
    }
}
