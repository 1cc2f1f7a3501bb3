//! 统一服务记录
//! 容器服务与原生系统服务共用一种输出结构，容器独有字段序列化时按需省略

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One resolved service, from either the Docker scan or the native scan.
///
/// Records are immutable once built; every scan rebuilds the catalog from
/// scratch. A populated `url` always begins with `http://` or `https://` —
/// [`ServiceRecord::from_container`] refuses to construct a record otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Container ID, or PID for native services.
    pub id: String,
    pub name: String,
    /// Explicit title from labels; falls back to the service name.
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Ordering hint, kept as opaque text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Port descriptors: "ip:host->container/proto" for containers,
    /// bare port numbers for native services.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_labels: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_likely_web_service: bool,
    pub status: String,
}

impl ServiceRecord {
    /// Build a record for a containerized service.
    ///
    /// Returns `None` when `url` is empty or not HTTP(S)-prefixed — such
    /// containers are excluded from the catalog, which only lists services
    /// presumed directly browsable.
    #[allow(clippy::too_many_arguments)]
    pub fn from_container(
        id: String,
        name: String,
        title: String,
        icon: String,
        description: String,
        category: String,
        order: String,
        url: String,
        ports: Vec<String>,
        networks: Vec<String>,
        raw_labels: HashMap<String, String>,
        image_name: String,
        status: String,
    ) -> Option<Self> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return None;
        }
        Some(ServiceRecord {
            id,
            name,
            title,
            icon,
            description,
            category,
            order,
            url: Some(url),
            ports,
            networks,
            raw_labels: Some(raw_labels),
            image_name: Some(image_name),
            is_likely_web_service: true,
            status,
        })
    }

    /// Build a record for a native system service. Native services carry no
    /// URL; the listening-port set decides web relevance.
    pub fn from_process(
        pid: String,
        name: String,
        status: String,
        listening_ports: Vec<String>,
        is_likely_web_service: bool,
    ) -> Self {
        ServiceRecord {
            id: pid,
            title: name.clone(),
            name,
            icon: String::new(),
            description: String::new(),
            category: String::new(),
            order: String::new(),
            url: None,
            ports: listening_ports,
            networks: Vec::new(),
            raw_labels: None,
            image_name: None,
            is_likely_web_service,
            status,
        }
    }
}
