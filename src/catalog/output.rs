//! 输出层：接收 CatalogReport，渲染 text 或 json

use crate::catalog::record::ServiceRecord;
use crate::catalog::CatalogReport;
use crate::utils::{DockletError, Result};

pub fn display(report: &CatalogReport, format: &str, verbose: bool) -> Result<()> {
    match format {
        "json" => display_json(report),
        "text" => display_text(report, verbose),
        other => Err(DockletError::System(format!("unknown format: {}", other))),
    }
}

// ── JSON ────────────────────────────────────────────────────────────────────

fn display_json(report: &CatalogReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| DockletError::System(format!("JSON serialize: {}", e)))?;
    println!("{}", json);
    Ok(())
}

// ── Text ────────────────────────────────────────────────────────────────────

fn display_text(report: &CatalogReport, verbose: bool) -> Result<()> {
    print_section("SERVICE CATALOG");
    println!("  Collected at : {}", report.collected_at);
    println!("  Host address : {}", report.host_address);

    if let Some(containers) = &report.containers {
        print_section(&format!("DOCKER SERVICES ({})", containers.len()));
        for (i, s) in containers.iter().enumerate() {
            println!("  [{}/{}]", i + 1, containers.len());
            display_service_text(s, verbose);
        }
    }

    if let Some(system) = &report.system {
        print_section(&format!("SYSTEM SERVICES ({})", system.len()));
        for s in system {
            display_system_service_line(s);
        }
    }

    Ok(())
}

fn display_service_text(s: &ServiceRecord, verbose: bool) {
    let status_icon = match s.status.as_str() {
        "running" => "●",
        "exited"  => "○",
        _         => "?",
    };

    println!("  {} {} [{}]", status_icon, s.title, s.status);
    println!("      ID         : {}", s.id);
    if s.title != s.name {
        println!("      Name       : {}", s.name);
    }
    if let Some(image) = &s.image_name {
        println!("      Image      : {}", image);
    }
    if let Some(url) = &s.url {
        println!("      URL        : {}", url);
    }
    if !s.description.is_empty() {
        println!("      Descr      : {}", s.description);
    }
    if !s.category.is_empty() {
        println!("      Category   : {}{}", s.category,
            if s.order.is_empty() { String::new() } else { format!("  (order: {})", s.order) });
    }
    if !s.ports.is_empty() {
        println!("      Ports      : {}", s.ports.join(", "));
    }
    if !s.networks.is_empty() {
        println!("      Networks   : {}", s.networks.join(", "));
    }
    if verbose {
        if let Some(labels) = &s.raw_labels {
            if !labels.is_empty() {
                println!("      Labels:");
                let mut keys: Vec<&String> = labels.keys().collect();
                keys.sort();
                for k in keys {
                    println!("        {} = {}", k, labels[k]);
                }
            }
        }
    }
}

fn display_system_service_line(s: &ServiceRecord) {
    let web = if s.is_likely_web_service { "  [web]" } else { "" };
    let ports = if s.ports.is_empty() {
        String::new()
    } else {
        format!("  ports: {}", s.ports.join(","))
    };
    println!("  {:<44} pid {:<7} {}{}{}", s.name, s.id, s.status, ports, web);
}

fn print_section(title: &str) {
    println!("\n{}", "─".repeat(60));
    println!("  {}", title);
    println!("{}", "─".repeat(60));
}
