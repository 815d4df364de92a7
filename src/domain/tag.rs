/// Marker preceding a fully qualified tag name in a decoration line
pub const TAG_MARKER: &str = " refs/tags/";

/// A tag found in the decoration listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    pub name: String,
    /// The tag reference opens its line, i.e. it decorates the branch tip itself
    pub precise: bool,
}

impl TagCandidate {
    /// Create a new tag candidate
    pub fn new(name: impl Into<String>, precise: bool) -> Self {
        TagCandidate {
            name: name.into(),
            precise,
        }
    }
}

/// Extract the tag named by a single decoration line.
///
/// Only the first occurrence of [`TAG_MARKER`] is considered. The name runs up
/// to the next `,`, or failing that the next `)`. A line where neither follows
/// the marker, or where the name is empty, is malformed and yields `None`.
///
/// # Example
/// ```
/// # use findversion::domain::parse_decoration_line;
/// let tag = parse_decoration_line(" (HEAD -> refs/heads/rb, tag: refs/tags/v1.0.0)").unwrap();
/// assert_eq!(tag.name, "v1.0.0");
/// assert!(!tag.precise);
/// ```
pub fn parse_decoration_line(line: &str) -> Option<TagCandidate> {
    let start = line.find(TAG_MARKER)?;
    let rest = &line[start + TAG_MARKER.len()..];

    let end = rest.find(',').or_else(|| rest.find(')'))?;
    let name = &rest[..end];
    if name.is_empty() {
        return None;
    }

    Some(TagCandidate::new(name, start == 0))
}

/// Pick the closest tag from a decoration listing ordered newest commit first.
///
/// The first line that yields a tag wins; later lines are not consulted.
pub fn find_closest_tag<I, S>(lines: I) -> Option<TagCandidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().find_map(|line| {
        let line = line.as_ref();
        let candidate = parse_decoration_line(line);
        tracing::trace!(line, found = candidate.is_some(), "decoration line");
        candidate
    })
}
