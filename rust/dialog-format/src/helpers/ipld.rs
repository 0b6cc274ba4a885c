use ipld_core::{cid::Cid, ipld::Ipld};

use crate::{FormatError, LinkShape, PATH_SEPARATOR, Path, Resolution};

/// Walk `path` through an already decoded node.
///
/// The walk stops early at anything link-shaped, handing it back with the
/// segments that are left. Map entries are addressed by key and list entries
/// by their decimal index.
pub fn resolve_ipld(node: Ipld, path: &Path) -> Result<Resolution, FormatError> {
    let mut value = node;

    for (consumed, segment) in path.segments().iter().enumerate() {
        if LinkShape::classify(&value).is_link_shaped() {
            return Ok(Resolution {
                value,
                remainder: path.skip(consumed),
            });
        }

        let next = match value {
            Ipld::Map(mut entries) => entries.remove(segment),
            Ipld::List(entries) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| entries.into_iter().nth(index)),
            _ => None,
        };

        value = next.ok_or_else(|| {
            FormatError::PathNotFound(path.take(consumed + 1).to_string())
        })?;
    }

    Ok(Resolution {
        value,
        remainder: Path::root(),
    })
}

/// List every path inside a decoded node, parents before their children.
/// Link-shaped values are listed but not descended into.
///
/// Map keys that no [Path] can address are left out along with everything
/// beneath them: the empty key, `.`, and keys containing the separator.
pub fn ipld_paths(node: &Ipld) -> Vec<String> {
    ipld_paths_with_links(node)
        .into_iter()
        .map(|(path, _)| path)
        .collect()
}

/// [ipld_paths], each path paired with the link found there (if any), from a
/// single walk of the node
pub fn ipld_paths_with_links(node: &Ipld) -> Vec<(String, Option<Cid>)> {
    let mut paths = Vec::new();
    collect_paths(node, "", &mut paths);
    paths
}

fn is_addressable(key: &str) -> bool {
    !key.is_empty() && key != "." && !key.contains(PATH_SEPARATOR)
}

fn collect_paths(value: &Ipld, prefix: &str, paths: &mut Vec<(String, Option<Cid>)>) {
    if LinkShape::classify(value).is_link_shaped() {
        return;
    }

    let mut visit = |key: &str, child: &Ipld| {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{key}")
        };
        paths.push((path.clone(), LinkShape::classify(child).cid()));
        collect_paths(child, &path, paths);
    };

    match value {
        Ipld::Map(entries) => {
            for (key, child) in entries {
                if is_addressable(key) {
                    visit(key, child);
                }
            }
        }
        Ipld::List(entries) => {
            for (index, child) in entries.iter().enumerate() {
                visit(&index.to_string(), child);
            }
        }
        _ => (),
    }
}
