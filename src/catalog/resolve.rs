//! URL 推导
//! 来源：容器标签 + 端口映射，按固定优先级推导唯一访问地址

use crate::catalog::docker::PortBinding;
use crate::config;
use std::collections::HashMap;

/// Derive the single best-effort access URL for one container.
///
/// Precedence, first match wins:
/// 1. `docklet.url` label, verbatim
/// 2. lowest published host port, with `docklet.port` selecting a specific
///    container port's mapping when one matches
/// 3. `docklet.port` alone when nothing is published (host-networking guess)
///
/// A `docklet.url_override` label clobbers the result of all of the above.
/// Returns `None` when no rule applies; the caller decides what exclusion
/// means. Pure apart from warning logs.
pub fn resolve_url(
    name: &str,
    labels: &HashMap<String, String>,
    ports: &[PortBinding],
    host: &str,
) -> Option<String> {
    let mut url = resolve_from_labels_and_ports(name, labels, ports, host);

    // Checked last: the override replaces whatever was computed above.
    if let Some(override_url) = non_empty_label(labels, "url_override") {
        url = Some(override_url.to_string());
    }

    url
}

fn resolve_from_labels_and_ports(
    name: &str,
    labels: &HashMap<String, String>,
    ports: &[PortBinding],
    host: &str,
) -> Option<String> {
    if let Some(custom) = non_empty_label(labels, "url") {
        return Some(custom.to_string());
    }

    let port_label = non_empty_label(labels, "port");

    match lowest_published_port(ports) {
        Some(default_port) => {
            let mut chosen = default_port;
            if let Some(label_value) = port_label {
                match label_value.parse::<u16>() {
                    Ok(container_port) => {
                        match published_host_port_for(ports, container_port) {
                            Some(host_port) => chosen = host_port,
                            None => log::warn!(
                                "container {} specified docklet.port {}, but no corresponding \
                                 host port mapping found; using lowest published port",
                                name, label_value
                            ),
                        }
                    }
                    Err(_) => log::warn!(
                        "container {} has invalid docklet.port label '{}'; ignoring",
                        name, label_value
                    ),
                }
            }
            Some(format!("http://{}:{}", host, chosen))
        }
        // Nothing published. A parseable port label is still usable as a
        // direct guess for host networking; reachability is not verified.
        None => match port_label {
            Some(label_value) => match label_value.parse::<u16>() {
                Ok(port) => Some(format!("http://{}:{}", host, port)),
                Err(_) => {
                    log::warn!(
                        "container {} has invalid docklet.port label '{}'; ignoring",
                        name, label_value
                    );
                    None
                }
            },
            None => None,
        },
    }
}

/// Lowest nonzero host-side port; ties keep the first binding encountered.
fn lowest_published_port(ports: &[PortBinding]) -> Option<u16> {
    let mut lowest: Option<u16> = None;
    for p in ports {
        if p.host_port > 0 && lowest.map_or(true, |l| p.host_port < l) {
            lowest = Some(p.host_port);
        }
    }
    lowest
}

fn published_host_port_for(ports: &[PortBinding], container_port: u16) -> Option<u16> {
    ports.iter()
        .find(|p| p.container_port == container_port && p.host_port > 0)
        .map(|p| p.host_port)
}

fn non_empty_label<'a>(labels: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    labels.get(&config::label(key))
        .map(String::as_str)
        .filter(|s| !s.is_empty())
}
