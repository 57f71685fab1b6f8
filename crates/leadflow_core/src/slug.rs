//! Workspace slug derivation.

use leadflow_ids::short_suffix;

/// Length of the random hex suffix appended to derived slugs.
const SUFFIX_LEN: usize = 6;

/// Base used when a name contains no alphanumeric characters at all.
const FALLBACK_BASE: &str = "workspace";

/// Derive a URL-safe identifier from a display name: lowercase, runs of
/// non-alphanumeric characters collapsed to a single `-`, leading and
/// trailing separators trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Slugify plus a short random suffix so two workspaces named the same
/// thing never collide on the unique slug column.
pub fn unique_slug(name: &str) -> String {
    let base = slugify(name);
    let base = if base.is_empty() { FALLBACK_BASE } else { &base };
    format!("{}-{}", base, short_suffix(SUFFIX_LEN))
}
