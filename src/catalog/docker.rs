//! 容器元数据读取
//! 来源：docker ps / docker inspect

use crate::utils::{DockletError, Result};
use std::collections::HashMap;
use std::process::Command;

// ── 数据结构 ────────────────────────────────────────────────────────────────

/// Read-only view of one running container, as reported by the runtime.
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    pub id: String,
    /// First name is canonical; leading '/' already trimmed.
    pub names: Vec<String>,
    pub image: String,
    pub state: String,             // "running" / "exited" / ...
    pub labels: HashMap<String, String>,
    pub ports: Vec<PortBinding>,
    pub networks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortBinding {
    pub protocol: String,
    pub container_port: u16,
    /// 0 means the port is exposed but not published on the host.
    pub host_port: u16,
    pub host_ip: String,
}

impl PortBinding {
    /// Human-readable descriptor, same shape the docker CLI prints.
    pub fn describe(&self) -> String {
        if self.host_port > 0 {
            format!("{}:{}->{}/{}",
                self.host_ip, self.host_port, self.container_port, self.protocol)
        } else {
            format!("{}/{} (no host port)", self.container_port, self.protocol)
        }
    }
}

/// Deduplicated descriptor list for one container's bindings.
pub fn port_descriptors(ports: &[PortBinding]) -> Vec<String> {
    let mut seen = Vec::new();
    for p in ports {
        let d = p.describe();
        if !seen.contains(&d) {
            seen.push(d);
        }
    }
    seen
}

// ── docker ps / inspect ─────────────────────────────────────────────────────

/// List running containers with their metadata.
///
/// A failing `docker ps` is a hard error for the whole operation; a failing
/// `docker inspect` on one container is logged and that container skipped.
pub fn list_containers() -> Result<Vec<ContainerRecord>> {
    let ids = list_running_ids()?;
    let mut containers = Vec::new();

    for id in &ids {
        match docker_inspect(id).and_then(|json| parse_inspect(&json)) {
            Ok(record) => containers.push(record),
            Err(e) => log::warn!("skipping container {}: {}", id, e),
        }
    }

    Ok(containers)
}

fn list_running_ids() -> Result<Vec<String>> {
    let out = Command::new("docker")
        .args(&["ps", "-q", "--no-trunc"])
        .output()
        .map_err(|e| DockletError::Docker(format!("docker ps failed: {}", e)))?;

    if !out.status.success() {
        return Err(DockletError::Docker(
            "docker ps failed — is Docker running?".to_string()
        ));
    }

    Ok(String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

fn docker_inspect(id: &str) -> Result<serde_json::Value> {
    let out = Command::new("docker")
        .args(&["inspect", id])
        .output()
        .map_err(|e| DockletError::Docker(format!("docker inspect failed: {}", e)))?;

    if !out.status.success() {
        return Err(DockletError::Docker(format!("container {} not found", id)));
    }

    let arr: serde_json::Value = serde_json::from_slice(&out.stdout)
        .map_err(|e| DockletError::Parse(format!("inspect JSON: {}", e)))?;

    arr.as_array()
        .and_then(|a| a.first())
        .cloned()
        .ok_or_else(|| DockletError::Parse("empty inspect result".to_string()))
}

// ── inspect 解析 ────────────────────────────────────────────────────────────

/// Pure parser over one `docker inspect` object, so tests feed fixture JSON.
pub fn parse_inspect(c: &serde_json::Value) -> Result<ContainerRecord> {
    let id: String = c["Id"].as_str().unwrap_or("").chars().take(12).collect();
    if id.is_empty() {
        return Err(DockletError::Parse("inspect result has no Id".to_string()));
    }

    let name = c["Name"].as_str().unwrap_or("")
        .trim_start_matches('/')
        .to_string();
    let names = if name.is_empty() { vec![id.clone()] } else { vec![name] };

    let image = c["Config"]["Image"].as_str().unwrap_or("").to_string();
    let state = c["State"]["Status"].as_str().unwrap_or("").to_string();

    let labels = c["Config"]["Labels"].as_object()
        .map(|m| m.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect())
        .unwrap_or_default();

    Ok(ContainerRecord {
        id,
        names,
        image,
        state,
        labels,
        ports: parse_ports(c),
        networks: parse_networks(c),
    })
}

fn parse_ports(c: &serde_json::Value) -> Vec<PortBinding> {
    let mut ports = Vec::new();
    let Some(map) = c["NetworkSettings"]["Ports"].as_object() else {
        return ports;
    };

    for (key, bindings) in map {
        // Key shape: "8080/tcp"
        let (cport_str, proto) = key
            .split_once('/')
            .unwrap_or((key.as_str(), "tcp"));
        let Ok(container_port) = cport_str.parse::<u16>() else {
            continue;
        };

        match bindings.as_array() {
            Some(arr) if !arr.is_empty() => {
                for b in arr {
                    let host_port = b["HostPort"].as_str()
                        .and_then(|s| s.parse::<u16>().ok())
                        .unwrap_or(0);
                    ports.push(PortBinding {
                        protocol: proto.to_string(),
                        container_port,
                        host_port,
                        host_ip: b["HostIp"].as_str().unwrap_or("0.0.0.0").to_string(),
                    });
                }
            }
            // null or [] — exposed but unpublished
            _ => ports.push(PortBinding {
                protocol: proto.to_string(),
                container_port,
                host_port: 0,
                host_ip: String::new(),
            }),
        }
    }

    ports
}

fn parse_networks(c: &serde_json::Value) -> Vec<String> {
    c["NetworkSettings"]["Networks"].as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> serde_json::Value {
        serde_json::json!({
            "Id": "0123456789abcdef0123456789abcdef",
            "Name": "/app1",
            "Config": {
                "Image": "nginx:latest",
                "Labels": {
                    "docklet.title": "App One",
                    "docklet.port": "8080"
                }
            },
            "State": { "Status": "running" },
            "NetworkSettings": {
                "Ports": {
                    "8080/tcp": [
                        { "HostIp": "0.0.0.0", "HostPort": "32768" }
                    ],
                    "9090/tcp": null
                },
                "Networks": {
                    "bridge": { "IPAddress": "172.17.0.2" }
                }
            }
        })
    }

    #[test]
    fn test_parse_inspect() {
        let rec = parse_inspect(&fixture()).unwrap();
        assert_eq!(rec.id, "0123456789ab");
        assert_eq!(rec.names, vec!["app1".to_string()]);
        assert_eq!(rec.image, "nginx:latest");
        assert_eq!(rec.state, "running");
        assert_eq!(rec.labels.get("docklet.port").unwrap(), "8080");
        assert_eq!(rec.networks, vec!["bridge".to_string()]);

        assert_eq!(rec.ports.len(), 2);
        let published = rec.ports.iter().find(|p| p.container_port == 8080).unwrap();
        assert_eq!(published.host_port, 32768);
        assert_eq!(published.host_ip, "0.0.0.0");
        let unpublished = rec.ports.iter().find(|p| p.container_port == 9090).unwrap();
        assert_eq!(unpublished.host_port, 0);
    }

    #[test]
    fn test_parse_inspect_missing_id() {
        assert!(parse_inspect(&serde_json::json!({})).is_err());
    }

    #[test]
    fn test_port_descriptors_dedup() {
        let ports = vec![
            PortBinding {
                protocol: "tcp".to_string(),
                container_port: 80,
                host_port: 8080,
                host_ip: "0.0.0.0".to_string(),
            },
            PortBinding {
                protocol: "tcp".to_string(),
                container_port: 80,
                host_port: 8080,
                host_ip: "0.0.0.0".to_string(),
            },
            PortBinding {
                protocol: "tcp".to_string(),
                container_port: 443,
                host_port: 0,
                host_ip: String::new(),
            },
        ];
        let descriptors = port_descriptors(&ports);
        assert_eq!(descriptors, vec![
            "0.0.0.0:8080->80/tcp".to_string(),
            "443/tcp (no host port)".to_string(),
        ]);
    }
}
