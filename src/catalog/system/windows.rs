//! Windows 服务枚举 — 占位实现
//! `sc query` 解析尚未实现，返回单条标记为占位的记录

use crate::catalog::record::ServiceRecord;
use crate::utils::Result;

/// Placeholder backend: real enumeration (`sc query` parse) is not
/// implemented. Returns a single clearly-flagged synthetic record rather
/// than an empty list, so downstream consumers can be exercised.
pub fn list_services() -> Result<Vec<ServiceRecord>> {
    log::warn!("native service enumeration is not implemented on Windows; returning a placeholder record");

    let mut record = ServiceRecord::from_process(
        "-".to_string(),
        "dummy-windows-service".to_string(),
        "running".to_string(),
        vec!["80".to_string()],
        true,
    );
    record.description = "Placeholder: Windows service detection is not implemented.".to_string();

    Ok(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_flagged() {
        let records = list_services().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].description.contains("Placeholder"));
        assert!(records[0].is_likely_web_service);
    }
}
