//! HTTP span helpers.

use uuid::Uuid;

/// `METHOD /path` with UUID segments collapsed so entry routes group together.
pub(super) fn route_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{entry}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}
