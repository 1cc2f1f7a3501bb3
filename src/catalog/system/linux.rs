//! Linux 服务枚举
//! 来源：systemctl list-units / systemctl show -p MainPID

use crate::catalog::record::ServiceRecord;
use crate::catalog::system::{records_from_entries, ProcessEntry};
use crate::utils::{DockletError, Result};
use std::process::Command;

pub fn list_services() -> Result<Vec<ServiceRecord>> {
    let out = Command::new("systemctl")
        .args(&[
            "list-units",
            "--type=service",
            "--all",
            "--no-pager",
            "--plain",
            "--no-legend",
        ])
        .output()
        .map_err(|e| DockletError::System(format!("failed to execute systemctl: {}", e)))?;

    if !out.status.success() {
        return Err(DockletError::System(format!(
            "systemctl list-units failed: exit {:?}, stderr: {}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let mut entries = parse_list_units(&String::from_utf8_lossy(&out.stdout));

    // systemctl does not print PIDs in the unit list; fetch them for active
    // units so the port extractor has something to scope to.
    for e in &mut entries {
        if e.status == "running" {
            e.pid = main_pid(&e.name);
        }
    }

    Ok(records_from_entries(entries))
}

/// Pure parser over `systemctl list-units --plain --no-legend` output.
///
/// Columns: UNIT LOAD ACTIVE SUB DESCRIPTION. Lines with fewer than four
/// fields are skipped. The PID is filled in separately; entries start with
/// the "-" sentinel.
pub fn parse_list_units(output: &str) -> Vec<ProcessEntry> {
    let mut entries = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || !fields[0].ends_with(".service") {
            continue;
        }

        entries.push(ProcessEntry {
            pid: "-".to_string(),
            name: fields[0].to_string(),
            status: normalize_active_state(fields[2]),
        });
    }

    entries
}

fn normalize_active_state(active: &str) -> String {
    match active {
        "active" => "running".to_string(),
        "failed" => "exited(status: failed)".to_string(),
        "inactive" => "stopped/unloaded".to_string(),
        other => other.to_string(),
    }
}

/// MainPID of a unit, as a string. Returns the "-" sentinel when the query
/// fails or the unit has no main process, so the extractor short-circuits.
fn main_pid(unit: &str) -> String {
    let out = Command::new("systemctl")
        .args(&["show", "-p", "MainPID", "--value", unit])
        .output();

    match out {
        Ok(o) if o.status.success() => {
            let pid = String::from_utf8_lossy(&o.stdout).trim().to_string();
            if pid.is_empty() { "-".to_string() } else { pid }
        }
        _ => {
            log::warn!("could not determine MainPID for {}; skipping port lookup", unit);
            "-".to_string()
        }
    }
}
