//! 环境变量配置
//! 来源：DOCKLET_HOST_IP 等环境变量，缺省时回退到内置默认值

/// Label namespace for service metadata attached to containers.
pub const LABEL_PREFIX: &str = "docklet.";

pub const DEFAULT_HOST: &str = "localhost";

/// Read an environment variable, falling back to a default when unset or empty.
pub fn env_or_default(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

/// Host address injected into resolved URLs (`DOCKLET_HOST_IP`).
pub fn host_address() -> String {
    env_or_default("DOCKLET_HOST_IP", DEFAULT_HOST)
}

pub fn label(key: &str) -> String {
    format!("{}{}", LABEL_PREFIX, key)
}
