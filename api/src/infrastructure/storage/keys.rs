use std::path::{Component, Path, PathBuf};

/// Validates a storage key and returns it as a relative path.
/// Rejects empty keys, absolute paths and any `..` traversal.
pub fn normalize_key(key: &str) -> anyhow::Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(key).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => continue,
            _ => anyhow::bail!("invalid storage key: {}", key),
        }
    }
    if relative.as_os_str().is_empty() {
        anyhow::bail!("invalid storage key: {}", key);
    }
    Ok(relative)
}

/// Normalised key rendered with `/` separators, as used for object names.
pub fn object_key(key: &str) -> anyhow::Result<String> {
    let relative = normalize_key(key)?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

pub fn normalize_prefix(root: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for comp in root.components() {
        if let Component::Normal(os) = comp {
            let s = os.to_string_lossy();
            if !s.is_empty() && s != "." {
                parts.push(s.replace('\\', "/"));
            }
        }
    }
    parts.join("/")
}

pub fn prefixed_key(prefix: &str, relative: &str) -> String {
    let rel = relative.trim_start_matches('/');
    if prefix.is_empty() {
        rel.to_string()
    } else if rel.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, rel)
    }
}
