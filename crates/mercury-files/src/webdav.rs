//! WebDAV `PROPFIND` response reading.
//!
//! A `PROPFIND` with `Depth: 1` on a directory returns a `multistatus`
//! document with one `response` per child plus one for the directory itself.
//! Elements are matched on their local name so any namespace prefix works.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::error::{FilesError, Result};
use crate::paths::file_name;

/// Path prefix the WebDAV servlet is mounted under.
pub const WEBDAV_ROOT: &str = "/api/v1/webdav";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Directory,
    File,
}

/// One file or directory from a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Decoded path below [`WEBDAV_ROOT`], without trailing slash.
    pub filename: String,
    pub basename: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
    /// Metadata IRI of the file, from `fs:iri`.
    pub iri: Option<String>,
}

impl FileEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// Properties gathered for a single `response` element.
#[derive(Default)]
struct RawEntry {
    href: String,
    last_modified: String,
    content_length: String,
    iri: String,
    collection: bool,
}

#[derive(Clone, Copy)]
enum Field {
    Href,
    LastModified,
    ContentLength,
    Iri,
}

/// Parse every `response` in a multistatus document, in document order.
pub fn parse_propfind(xml: &str) -> Result<Vec<FileEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"response" => current = Some(RawEntry::default()),
                    b"href" => field = Some(Field::Href),
                    b"getlastmodified" => field = Some(Field::LastModified),
                    b"getcontentlength" => field = Some(Field::ContentLength),
                    b"iri" => field = Some(Field::Iri),
                    b"collection" => mark_collection(current.as_mut()),
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"collection" {
                    mark_collection(current.as_mut());
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"response" => {
                        if let Some(raw) = current.take() {
                            entries.push(into_entry(raw)?);
                        }
                    }
                    b"href" | b"getlastmodified" | b"getcontentlength" | b"iri" => field = None,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(f), Some(entry)) = (field, current.as_mut()) {
                    let text = e
                        .unescape()
                        .map_err(|err| FilesError::XmlParse(format!("{err}")))?;
                    let target = match f {
                        Field::Href => &mut entry.href,
                        Field::LastModified => &mut entry.last_modified,
                        Field::ContentLength => &mut entry.content_length,
                        Field::Iri => &mut entry.iri,
                    };
                    target.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FilesError::XmlParse(format!("{e}"))),
            _ => {}
        }
    }

    tracing::debug!(entries = entries.len(), "Parsed PROPFIND response");
    Ok(entries)
}

fn mark_collection(entry: Option<&mut RawEntry>) {
    if let Some(entry) = entry {
        entry.collection = true;
    }
}

fn into_entry(raw: RawEntry) -> Result<FileEntry> {
    let filename = href_to_path(raw.href.trim())?;
    let basename = file_name(&filename).to_string();

    let last_modified = non_empty(&raw.last_modified).and_then(|s| {
        DateTime::parse_from_rfc2822(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| tracing::warn!(value = s, error = %e, "Unparseable getlastmodified"))
            .ok()
    });
    let size = non_empty(&raw.content_length).and_then(|s| s.parse::<u64>().ok());

    Ok(FileEntry {
        filename,
        basename,
        kind: if raw.collection {
            FileKind::Directory
        } else {
            FileKind::File
        },
        size,
        last_modified,
        iri: non_empty(&raw.iri).map(str::to_string),
    })
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Turn an href (absolute URL or path) into a decoded path below the WebDAV
/// root, with a leading slash and no trailing slash.
pub fn href_to_path(href: &str) -> Result<String> {
    let path = match href.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |idx| &rest[idx..]),
        None => href,
    };
    let path = path.strip_prefix(WEBDAV_ROOT).unwrap_or(path);

    let decoded = urlencoding::decode(path).map_err(|_| FilesError::InvalidHref {
        href: href.to_string(),
    })?;
    let trimmed = decoded.trim_end_matches('/');

    Ok(if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    })
}

/// The children of `directory` from a `Depth: 1` response: the directory's
/// own entry is dropped, directories come first, then by filename.
pub fn list_directory(xml: &str, directory: &str) -> Result<Vec<FileEntry>> {
    let own = format!("/{}", directory.trim_matches('/'));
    let mut entries: Vec<FileEntry> = parse_propfind(xml)?
        .into_iter()
        .filter(|entry| entry.filename != own)
        .collect();

    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.filename.cmp(&b.filename)));
    Ok(entries)
}

/// Basenames of a listing, as input for conflict-free naming.
pub fn basenames(entries: &[FileEntry]) -> Vec<String> {
    entries.iter().map(|e| e.basename.clone()).collect()
}
