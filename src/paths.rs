//! Remote and local path handling.

use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a drive path segment. `/` is kept as separator.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Strip leading and trailing `/` and percent-encode each segment.
fn encode_remote(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// URL listing the children of `remote_path`. An empty path lists the drive root.
pub fn children_url(base_url: &str, remote_path: &str) -> String {
    let path = encode_remote(remote_path);
    if path.is_empty() {
        format!("{}/root/children", base_url)
    } else {
        format!("{}/root:/{}:/children", base_url, path)
    }
}

/// URL of a drive item addressed by id.
pub fn item_url(base_url: &str, item_id: &str) -> String {
    format!("{}/items/{}", base_url, item_id)
}

/// URL creating an upload session for `remote_path/file_name`.
pub fn upload_session_url(base_url: &str, remote_path: &str, file_name: &str) -> String {
    let target = encode_remote(&format!("{}/{}", remote_path, file_name));
    format!("{}/root:/{}:/createUploadSession", base_url, target)
}

/// Normalise a local directory argument.
///
/// Leading and trailing separators are trimmed, so `/out/` resolves to the
/// relative directory `out`. An empty result is the current directory.
pub fn local_dir(local_path: &str) -> PathBuf {
    let trimmed = local_path.trim_matches(|c| c == '/' || c == std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://graph.microsoft.com/v1.0/sites/s/drives/d";

    #[test]
    fn test_children_url() {
        assert_eq!(
            children_url(BASE, "exports/daily"),
            format!("{}/root:/exports/daily:/children", BASE)
        );
        assert_eq!(
            children_url(BASE, "/exports/daily/"),
            format!("{}/root:/exports/daily:/children", BASE)
        );
    }

    #[test]
    fn test_children_url_root() {
        assert_eq!(children_url(BASE, ""), format!("{}/root/children", BASE));
        assert_eq!(children_url(BASE, "/"), format!("{}/root/children", BASE));
    }

    #[test]
    fn test_children_url_encodes_segments() {
        assert_eq!(
            children_url(BASE, "Shared Documents/Q1 #2"),
            format!("{}/root:/Shared%20Documents/Q1%20%232:/children", BASE)
        );
    }

    #[test]
    fn test_item_url() {
        assert_eq!(item_url(BASE, "01ABC"), format!("{}/items/01ABC", BASE));
    }

    #[test]
    fn test_upload_session_url() {
        assert_eq!(
            upload_session_url(BASE, "exports/", "data.csv"),
            format!("{}/root:/exports/data.csv:/createUploadSession", BASE)
        );
        assert_eq!(
            upload_session_url(BASE, "", "data.csv"),
            format!("{}/root:/data.csv:/createUploadSession", BASE)
        );
    }

    #[test]
    fn test_local_dir_trims_separators() {
        assert_eq!(local_dir("/out/"), PathBuf::from("out"));
        assert_eq!(local_dir("out"), PathBuf::from("out"));
        assert_eq!(local_dir("//data/in//"), PathBuf::from("data/in"));
    }

    #[test]
    fn test_local_dir_empty_is_current() {
        assert_eq!(local_dir(""), PathBuf::from("."));
        assert_eq!(local_dir("/"), PathBuf::from("."));
    }
}
