//! Version extraction from dependency manifests

use regex::Regex;

/// Extract the version constraint attached to `package` in `content`.
///
/// Matches the package name (case-insensitive, not as the tail of a longer
/// name such as `pytest-django`), optional PEP 508 extras (`fastapi[standard]`)
/// and then either a comparison operator (`==`, `>=`, `<=`, `~=`, `!=`, `>`,
/// `<`) or a version directly after the name. A bare space is not a
/// separator, so prose like "Django 5" in a comment or description is
/// skipped. Only the first match in document order is used. Missing
/// minor/patch components are filled with `0`.
///
/// ```
/// use universal_pwa::detection::extract_version;
///
/// assert_eq!(extract_version("Django==4.2.0", "django").as_deref(), Some("4.2.0"));
/// assert_eq!(extract_version("Django>=4.0", "django").as_deref(), Some("4.0.0"));
/// assert_eq!(extract_version("Django", "django"), None);
/// ```
pub fn extract_version(content: &str, package: &str) -> Option<String> {
    let pattern = format!(
        concat!(
            r"(?im)(?:^|[^\w.-]){}(?:\[[^\]]*\])?",
            r"(?:\s*(?:==|>=|<=|~=|!=|>|<)\s*)?",
            r"(\d+)(?:\.(\d+))?(?:\.(\d+))?",
        ),
        regex::escape(package)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(content)?;

    let major = caps.get(1)?.as_str();
    let minor = caps.get(2).map_or("0", |m| m.as_str());
    let patch = caps.get(3).map_or("0", |m| m.as_str());

    Some(format!("{}.{}.{}", major, minor, patch))
}
