use crate::extract::Bucket;

/// Placed between the parts of a collection file.
pub const COLLECTION_SEPARATOR: &str = "\n\n";

/// Tag of the collection ending with the group `id`.
pub fn collection_tag(id: &str) -> String {
    format!("base_{}", id)
}

/// Build the mobile-first collections: for every group, in sorted order, the
/// base text plus all groups up to and including it.
///
/// `groups` holds already-serialized media buckets. An empty base is left
/// out rather than producing a leading separator.
pub fn compose(base: &str, groups: &[Bucket]) -> Vec<Bucket> {
    let mut parts: Vec<&str> = Vec::with_capacity(groups.len() + 1);
    if !base.is_empty() {
        parts.push(base);
    }

    let mut collections = Vec::with_capacity(groups.len());
    for group in groups {
        parts.push(&group.css);
        collections.push(Bucket {
            tag: collection_tag(&group.tag),
            css: parts.join(COLLECTION_SEPARATOR),
        });
    }
    collections
}
