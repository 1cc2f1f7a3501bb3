pub mod docker;
pub mod output;
pub mod record;
pub mod resolve;
pub mod system;

use crate::config;
use crate::utils::Result;
use docker::ContainerRecord;
use record::ServiceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One scan's worth of resolved services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReport {
    pub collected_at: String,
    pub host_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<ServiceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<ServiceRecord>>,
}

pub fn run_scan(
    include_containers: bool,
    include_system: bool,
    web_only: bool,
    format: &str,
    verbose: bool,
) -> Result<()> {
    let host = config::host_address();

    let containers = if include_containers {
        eprintln!("Scanning Docker containers...");
        Some(list_container_services(&host)?)
    } else {
        None
    };

    let system = if include_system {
        eprintln!("Scanning native system services...");
        let mut records = system::list_services()?;
        if web_only {
            records.retain(|r| r.is_likely_web_service);
        }
        Some(records)
    } else {
        None
    };

    let report = CatalogReport {
        collected_at: chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string(),
        host_address: host,
        containers,
        system,
    };

    output::display(&report, format, verbose)
}

/// Containerized catalog: every running container with a resolvable
/// HTTP(S) URL, in container-listing order.
pub fn list_container_services(host: &str) -> Result<Vec<ServiceRecord>> {
    let containers = docker::list_containers()?;
    Ok(containers
        .into_iter()
        .filter_map(|c| build_record(c, host))
        .collect())
}

/// Resolve one container into a catalog record, or `None` when it lacks a
/// browsable URL (a filtering decision, logged, not an error).
fn build_record(c: ContainerRecord, host: &str) -> Option<ServiceRecord> {
    let name = c.names.first().cloned().unwrap_or_else(|| c.id.clone());
    let url = resolve::resolve_url(&name, &c.labels, &c.ports, host).unwrap_or_default();

    let record = ServiceRecord::from_container(
        c.id.clone(),
        name.clone(),
        label_or(&c.labels, "title", &name),
        label_or(&c.labels, "icon", ""),
        label_or(&c.labels, "description", ""),
        label_or(&c.labels, "category", ""),
        label_or(&c.labels, "order", ""),
        url.clone(),
        docker::port_descriptors(&c.ports),
        c.networks,
        c.labels,
        c.image,
        c.state,
    );

    if record.is_none() {
        log::info!(
            "skipping container {} ({}) without a valid HTTP/HTTPS URL: '{}'",
            name, c.id, url
        );
    }
    record
}

fn label_or(labels: &HashMap<String, String>, key: &str, default: &str) -> String {
    match labels.get(&config::label(key)) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::docker::PortBinding;
    use super::*;

    fn container(labels: &[(&str, &str)], ports: Vec<PortBinding>) -> ContainerRecord {
        ContainerRecord {
            id: "0123456789ab".to_string(),
            names: vec!["app1".to_string()],
            image: "nginx:latest".to_string(),
            state: "running".to_string(),
            labels: labels.iter()
                .map(|(k, v)| (format!("docklet.{}", k), v.to_string()))
                .collect(),
            ports,
            networks: vec!["bridge".to_string()],
        }
    }

    fn binding(container_port: u16, host_port: u16) -> PortBinding {
        PortBinding {
            protocol: "tcp".to_string(),
            container_port,
            host_port,
            host_ip: "0.0.0.0".to_string(),
        }
    }

    #[test]
    fn test_published_container_is_cataloged() {
        let c = container(&[("port", "8080"), ("title", "App One")],
            vec![binding(8080, 32768), binding(9090, 32769)]);
        let rec = build_record(c, "localhost").unwrap();
        assert_eq!(rec.url.as_deref(), Some("http://localhost:32768"));
        assert_eq!(rec.title, "App One");
        assert_eq!(rec.name, "app1");
        assert_eq!(rec.image_name.as_deref(), Some("nginx:latest"));
        assert_eq!(rec.networks, vec!["bridge".to_string()]);
        assert!(rec.raw_labels.is_some());
    }

    #[test]
    fn test_unresolvable_container_is_excluded() {
        // Only an unpublished port and no labels: no URL, record refused.
        let c = container(&[], vec![binding(80, 0)]);
        assert!(build_record(c, "localhost").is_none());
    }

    #[test]
    fn test_non_http_override_is_excluded() {
        let c = container(&[("url_override", "ssh://box:22")], vec![binding(80, 8080)]);
        assert!(build_record(c, "localhost").is_none());
    }

    #[test]
    fn test_title_falls_back_to_container_name() {
        let c = container(&[], vec![binding(80, 8080)]);
        let rec = build_record(c, "localhost").unwrap();
        assert_eq!(rec.title, "app1");
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let make = || container(&[("port", "8080")], vec![binding(8080, 32768)]);
        let a = build_record(make(), "localhost").unwrap();
        let b = build_record(make(), "localhost").unwrap();
        assert_eq!(a, b);
    }
}
