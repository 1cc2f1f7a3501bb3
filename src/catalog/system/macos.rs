//! macOS 服务枚举
//! 来源：launchctl list

use crate::catalog::record::ServiceRecord;
use crate::catalog::system::{records_from_entries, ProcessEntry};
use crate::utils::{DockletError, Result};
use std::process::Command;

pub fn list_services() -> Result<Vec<ServiceRecord>> {
    let out = Command::new("launchctl")
        .arg("list")
        .output()
        .map_err(|e| DockletError::System(format!("failed to execute launchctl list: {}", e)))?;

    let stdout = String::from_utf8_lossy(&out.stdout);

    // launchctl can exit nonzero when some jobs are in a bad state while
    // still printing a usable table. Only bail when there is no output.
    if !out.status.success() {
        if stdout.trim().is_empty() {
            return Err(DockletError::System(format!(
                "failed to execute launchctl list: exit {:?}, stderr: {}",
                out.status.code(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        log::debug!("launchctl list exited nonzero; parsing output anyway");
    }

    Ok(records_from_entries(parse_launchctl(&stdout)))
}

/// Pure parser over `launchctl list` output.
///
/// Columns: PID STATUS LABEL. The PID field is "-" for jobs without a live
/// process; STATUS is the last exit code, or "-" when not applicable. Lines
/// with fewer than three fields are skipped.
pub fn parse_launchctl(output: &str) -> Vec<ProcessEntry> {
    let mut entries = Vec::new();

    for line in output.lines() {
        if line.starts_with("PID") {
            continue; // header
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }

        let pid = fields[0];
        let status_field = fields[1];
        let label = fields[2];

        entries.push(ProcessEntry {
            pid: pid.to_string(),
            name: label.to_string(),
            status: normalize_status(pid, status_field),
        });
    }

    entries
}

fn is_running(pid: &str) -> bool {
    pid != "-" && pid != "0"
}

fn normalize_status(pid: &str, status_field: &str) -> String {
    if is_running(pid) {
        "running".to_string()
    } else if status_field == "0" {
        "loaded".to_string()
    } else if status_field != "-" {
        format!("exited(status: {})", status_field)
    } else {
        "stopped/unloaded".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCHCTL_OUTPUT: &str = "\
PID	Status	Label
412	0	com.example.httpd
-	0	com.example.idle
-	78	com.example.crashed
-	-	com.example.unloaded
malformed
";

    #[test]
    fn test_parse_launchctl_statuses() {
        let entries = parse_launchctl(LAUNCHCTL_OUTPUT);
        assert_eq!(entries.len(), 4); // header and malformed line skipped

        assert_eq!(entries[0], ProcessEntry {
            pid: "412".to_string(),
            name: "com.example.httpd".to_string(),
            status: "running".to_string(),
        });
        assert_eq!(entries[1].status, "loaded");
        assert_eq!(entries[2].status, "exited(status: 78)");
        assert_eq!(entries[3].status, "stopped/unloaded");
    }

    #[test]
    fn test_pid_zero_is_not_running() {
        assert_eq!(normalize_status("0", "0"), "loaded");
        assert_eq!(normalize_status("1", "-"), "running");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_launchctl(LAUNCHCTL_OUTPUT), parse_launchctl(LAUNCHCTL_OUTPUT));
    }
}
