//! Slug derivation and validation.

use std::collections::HashSet;

use folderlink_core::error::AppError;
use folderlink_core::result::AppResult;

use super::model::Node;

/// Derive a URL-safe slug from a title.
///
/// ASCII alphanumerics are lowercased and kept; every other run of
/// characters becomes a single `-`. Returns an empty string when nothing
/// usable remains.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Trim the slug and fill it in from the node's title when empty,
/// falling back to `node-<short id>`.
pub fn ensure_slug(node: &mut Node) {
    let trimmed = node.slug.trim();
    if !trimmed.is_empty() {
        if trimmed.len() != node.slug.len() {
            node.slug = trimmed.to_string();
        }
        return;
    }
    let derived = slugify(&node.title);
    node.slug = if derived.is_empty() {
        format!("node-{}", node.id.short())
    } else {
        derived
    };
}

/// Reject slugs that cannot serve as a single folder name.
pub fn validate_slug(slug: &str) -> AppResult<()> {
    if slug.trim().is_empty() {
        return Err(AppError::validation("Slug cannot be empty"));
    }
    if slug.contains('/') || slug.contains('\\') {
        return Err(AppError::validation(format!(
            "Slug '{slug}' cannot contain path separators"
        )));
    }
    if slug.chars().all(|c| c == '.') {
        return Err(AppError::validation(format!("Slug '{slug}' is reserved")));
    }
    Ok(())
}

/// `slug` itself when no sibling uses it, otherwise the first free
/// `slug-N` counting from 2.
pub fn unique_slug(slug: &str, taken: &HashSet<&str>) -> String {
    if !taken.contains(slug) {
        return slug.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{slug}-{n}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}
