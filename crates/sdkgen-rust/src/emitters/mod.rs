pub mod module;
pub mod scaffold;

/// File stem for the per-version module, e.g. `1.2.0` → `v1_2_0`.
pub fn version_module_ident(version: &str) -> String {
    let mut out = String::with_capacity(version.len() + 1);
    out.push('v');
    for ch in version.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_idents() {
        assert_eq!(version_module_ident("1.2.0"), "v1_2_0");
        assert_eq!(version_module_ident("2.0-beta"), "v2_0_beta");
    }
}
