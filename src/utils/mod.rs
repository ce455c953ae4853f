//! Utility functions for depbundle

/// Make a bundle name safe to use as a single file name
pub fn sanitize_file_name(name: &str) -> String {
    name.replace('/', "+").replace('\\', "+")
}

/// Parse package specifier (name@version)
pub fn parse_package_spec(spec: &str) -> (String, Option<String>) {
    if spec.starts_with('@') {
        // Scoped package like @scope/name@version
        if let Some(at_idx) = spec[1..].find('@') {
            let at_idx = at_idx + 1; // Adjust for the initial @
            let name = spec[..at_idx].to_string();
            let version = spec[at_idx + 1..].to_string();
            return (name, Some(version).filter(|v| !v.is_empty()));
        }
        (spec.to_string(), None)
    } else if let Some(at_idx) = spec.find('@') {
        let name = spec[..at_idx].to_string();
        let version = spec[at_idx + 1..].to_string();
        (name, Some(version).filter(|v| !v.is_empty()))
    } else {
        (spec.to_string(), None)
    }
}

/// Validate package name
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 214 {
        return false;
    }

    // Must not start with . or _
    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }

    // Scoped names need exactly one slash with text on both sides
    if let Some(scoped) = name.strip_prefix('@') {
        match scoped.split_once('/') {
            Some((scope, pkg)) if !scope.is_empty() && !pkg.is_empty() && !pkg.contains('/') => {}
            _ => return false,
        }
    } else if name.contains('/') {
        return false;
    }

    let valid_chars = |c: char| {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '-'
            || c == '_'
            || c == '.'
            || c == '~'
            || c == '@'
            || c == '/'
    };

    name.chars().all(valid_chars)
}
