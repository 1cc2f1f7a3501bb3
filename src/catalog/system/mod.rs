//! 原生系统服务枚举
//! 来源：launchctl (macOS) / systemctl (Linux) / 占位 (Windows)

pub mod linux;
pub mod macos;
pub mod ports;
pub mod windows;

use crate::catalog::record::ServiceRecord;
use crate::utils::{DockletError, Result};

/// Well-known web-dev ports. Listening on any of these marks a process as
/// likely serving HTTP.
pub const COMMON_WEB_PORTS: [u16; 9] = [80, 443, 3000, 3001, 5000, 5173, 8000, 8080, 8888];

pub fn is_common_web_port(port: &str) -> bool {
    port.parse::<u16>()
        .map(|p| COMMON_WEB_PORTS.contains(&p))
        .unwrap_or(false)
}

pub fn is_likely_web_service(ports: &[String]) -> bool {
    ports.iter().any(|p| is_common_web_port(p))
}

/// One process/unit as reported by the platform's service manager, with the
/// run state already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    /// PID string; "-" or "0" means not currently running.
    pub pid: String,
    pub name: String,
    pub status: String,
}

/// List native services for the current platform.
pub fn list_services() -> Result<Vec<ServiceRecord>> {
    match std::env::consts::OS {
        "macos" => macos::list_services(),
        "linux" => linux::list_services(),
        "windows" => windows::list_services(),
        other => Err(DockletError::UnsupportedOs(other.to_string())),
    }
}

/// Turn parsed entries into records: running entries get a port lookup and
/// the web-relevance flag. A failed lookup degrades that entry to an empty
/// port set; it never aborts the batch.
pub(crate) fn records_from_entries(entries: Vec<ProcessEntry>) -> Vec<ServiceRecord> {
    entries
        .into_iter()
        .map(|e| {
            let mut listening = Vec::new();
            if e.status == "running" {
                match ports::listening_ports(&e.pid) {
                    Ok(p) => listening = p,
                    Err(err) => log::warn!(
                        "failed to get listening ports for PID {} ({}): {}; \
                         this might be due to permissions or the process terminating",
                        e.pid, e.name, err
                    ),
                }
            }
            let web = is_likely_web_service(&listening);
            ServiceRecord::from_process(e.pid, e.name, e.status, listening, web)
        })
        .collect()
}
