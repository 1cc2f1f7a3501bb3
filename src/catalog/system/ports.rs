//! 监听端口提取
//! 来源：lsof -p <pid> -iTCP -sTCP:LISTEN -P -n

use crate::utils::{DockletError, Result};
use std::process::Command;

/// PIDs the service manager reports for entries with no live process.
const NOT_RUNNING_PIDS: [&str; 2] = ["-", "0"];

/// TCP ports in LISTEN state owned by `pid`, as strings, deduplicated.
///
/// Sentinel PIDs return an empty set without invoking anything. An lsof run
/// that merely found nothing (exit 1 with empty output, or a gone process)
/// also returns an empty set; any other failure is an error carrying the
/// captured stderr/stdout for diagnosis.
pub fn listening_ports(pid: &str) -> Result<Vec<String>> {
    if NOT_RUNNING_PIDS.contains(&pid) {
        return Ok(Vec::new());
    }

    let out = Command::new("lsof")
        .args(&["-p", pid, "-iTCP", "-sTCP:LISTEN", "-P", "-n"])
        .output()
        .map_err(|e| DockletError::PortScan {
            pid: pid.to_string(),
            detail: format!("failed to run lsof: {}", e),
        })?;

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    if !out.status.success() {
        // Exit 1 means "no files found" — no listening ports, or the process
        // exited between enumeration and lookup. Not an error for us.
        if out.status.code() == Some(1) && no_matches(&stdout, &stderr) {
            return Ok(Vec::new());
        }
        return Err(DockletError::PortScan {
            pid: pid.to_string(),
            detail: format!(
                "lsof exited with {:?}, stderr: {}, stdout: {}",
                out.status.code(),
                stderr.trim(),
                stdout.trim()
            ),
        });
    }

    Ok(parse_lsof_ports(&stdout))
}

fn no_matches(stdout: &str, stderr: &str) -> bool {
    stderr.contains("no such process")
        || stderr.contains("Can't be stat(2)ed")
        || stdout.trim().is_empty()
}

/// Pure parser over captured lsof output.
///
/// Each line ending in `(LISTEN)` carries a NAME field like `*:80`,
/// `127.0.0.1:8080` or `[::1]:443`; only the numeric port is kept, and the
/// same port reported under several address families collapses to one entry.
pub fn parse_lsof_ports(output: &str) -> Vec<String> {
    let mut ports: Vec<String> = Vec::new();

    for line in output.lines() {
        if line.starts_with("COMMAND") || line.trim().is_empty() {
            continue;
        }

        // NAME field sits immediately before the "(LISTEN)" marker.
        let mut name = None;
        let mut prev = None;
        for token in line.split_whitespace() {
            if token == "(LISTEN)" {
                name = prev;
                break;
            }
            prev = Some(token);
        }

        let Some(name) = name else { continue };
        let Some(port) = name.rsplit(':').next() else { continue };
        if port.parse::<u16>().is_ok() && !ports.iter().any(|p| p == port) {
            ports.push(port.to_string());
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSOF_OUTPUT: &str = "\
COMMAND   PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
nginx     412  root    6u  IPv4 0x1a2b3c4d      0t0  TCP *:8080 (LISTEN)
nginx     412  root    7u  IPv6 0x1a2b3c4e      0t0  TCP [::1]:8080 (LISTEN)
nginx     412  root    8u  IPv4 0x1a2b3c4f      0t0  TCP 127.0.0.1:9000 (LISTEN)
nginx     412  root    9u  IPv4 0x1a2b3c50      0t0  TCP 10.0.0.5:52720->10.0.0.9:443 (ESTABLISHED)
";

    #[test]
    fn test_parse_dedupes_across_address_families() {
        // 8080 shows up under IPv4 and IPv6; it must appear exactly once.
        let ports = parse_lsof_ports(LSOF_OUTPUT);
        assert_eq!(ports, vec!["8080".to_string(), "9000".to_string()]);
    }

    #[test]
    fn test_parse_ignores_non_listen_lines() {
        let ports = parse_lsof_ports(
            "nginx  412 root 9u IPv4 0x1 0t0 TCP 10.0.0.5:52720->10.0.0.9:443 (ESTABLISHED)\n",
        );
        assert!(ports.is_empty());
    }

    #[test]
    fn test_parse_handles_wildcard_and_bracketed_addresses() {
        let ports = parse_lsof_ports(
            "a 1 u 1u IPv4 0x1 0t0 TCP *:80 (LISTEN)\n\
             b 2 u 2u IPv6 0x2 0t0 TCP [fe80::1]:3000 (LISTEN)\n",
        );
        assert_eq!(ports, vec!["80".to_string(), "3000".to_string()]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_lsof_ports("").is_empty());
        assert!(parse_lsof_ports("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n").is_empty());
    }

    #[test]
    fn test_sentinel_pids_short_circuit() {
        assert!(listening_ports("-").unwrap().is_empty());
        assert!(listening_ports("0").unwrap().is_empty());
    }

    #[test]
    fn test_gone_process_message_is_not_an_error() {
        assert!(no_matches("", "lsof: no such process"));
        assert!(no_matches("", "lsof: status error on 412: Can't be stat(2)ed"));
        // Exit 1 with empty stdout simply means no listening ports.
        assert!(no_matches("", ""));
        assert!(!no_matches("something", "permission denied"));
    }
}
