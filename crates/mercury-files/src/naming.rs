//! Conflict-free naming for files arriving in a directory.
//!
//! A taken name gets ` (n)` inserted before its extension, with `n` counting
//! up from 1 until the name is free. Names are reserved as they are handed
//! out, so a batch never maps two incoming files onto the same name.

use std::collections::HashSet;

use crate::paths::{file_name, join_paths};

/// Return `name` if it is not in `used`, else the first free `name (n)`.
pub fn unique_file_name(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_string();
    }

    let (stem, extension) = split_extension(name);
    (1..)
        .map(|n| format!("{stem} ({n}){extension}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Split at the last `.`, unless that dot starts the name (`.bashrc`).
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Map each incoming name to a unique name within `existing`, in input order.
pub fn unique_file_names<E, I>(existing: E, incoming: I) -> Vec<(String, String)>
where
    E: IntoIterator,
    E::Item: Into<String>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut used: HashSet<String> = existing.into_iter().map(Into::into).collect();

    incoming
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let unique = unique_file_name(name, &used);
            if unique != name {
                tracing::debug!(original = name, renamed = %unique, "Resolved name conflict");
            }
            used.insert(unique.clone());
            (name.to_string(), unique)
        })
        .collect()
}

/// Pair each source path with a free destination path in `destination_dir`,
/// given the names already present there. Used for both move and copy.
pub fn unique_destination_paths<E, I>(
    sources: I,
    destination_dir: &str,
    existing: E,
) -> Vec<(String, String)>
where
    E: IntoIterator,
    E::Item: Into<String>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let sources: Vec<I::Item> = sources.into_iter().collect();
    let names = sources.iter().map(|source| file_name(source.as_ref()));

    unique_file_names(existing, names)
        .into_iter()
        .zip(&sources)
        .map(|((_, unique), source)| {
            (
                source.as_ref().to_string(),
                join_paths(&[destination_dir, unique.as_str()]),
            )
        })
        .collect()
}
