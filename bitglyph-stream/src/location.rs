//! Container/wrapper path resolution.
//!
//! A location is a root container plus a slash-separated subpath; resolving
//! it walks the longest existing prefix of that subpath, then repeatedly
//! unwraps single-stream wrappers (e.g. a compression codec) and opens
//! container signatures (e.g. an archive) against whatever remains, until
//! either the whole subpath is consumed or nothing further matches.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::LocationError;
use crate::stream::Stream;

/// Something that can be asked for a named child stream — a directory on
/// disk, or, via [`ContainerSignature::open`], an archive already opened
/// from another stream.
pub trait Container {
    fn open(&mut self, subpath: &str) -> io::Result<Stream>;
    fn list(&self) -> io::Result<Vec<String>>;
    fn is_dir(&self, subpath: &str) -> bool;
}

/// A plain filesystem directory acting as the root container.
pub struct FsContainer {
    root: PathBuf,
}

impl FsContainer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsContainer { root: root.into() }
    }
}

impl Container for FsContainer {
    fn open(&mut self, subpath: &str) -> io::Result<Stream> {
        let path = self.root.join(subpath);
        let file = fs::File::open(&path)?;
        Stream::from_reader(Some(subpath.to_string()), file)
    }

    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn is_dir(&self, subpath: &str) -> bool {
        self.root.join(subpath).is_dir()
    }
}

/// A single-stream transform, such as a compression codec, that may apply
/// to a leaf stream before container signatures get a chance to match.
pub trait WrapperSignature {
    fn matches(&self, stream: &mut Stream) -> io::Result<bool>;
    fn unwrap(&self, stream: Stream) -> io::Result<Stream>;
}

/// A multi-stream format, such as an archive, that opens as a [`Container`]
/// once its signature matches.
pub trait ContainerSignature {
    fn matches(&self, stream: &mut Stream) -> io::Result<bool>;
    fn open(&self, stream: Stream) -> io::Result<Box<dyn Container>>;
}

/// Resolve `path` within `root`, descending through wrappers and nested
/// containers as their signatures match.
///
/// 1. Walk the longest existing prefix of `path`'s components inside
///    `root`, opening nested containers along the way.
/// 2. Open the deepest matched component as a leaf [`Stream`].
/// 3. Repeatedly unwrap matching [`WrapperSignature`]s against that stream.
/// 4. If a [`ContainerSignature`] then matches, open it as a container and
///    recurse into it with whatever subpath remains; otherwise, if any
///    subpath remains unconsumed, fail with [`LocationError::UnresolvedSubpath`].
pub fn resolve(
    root: &mut dyn Container,
    path: &str,
    wrappers: &[Box<dyn WrapperSignature>],
    containers: &[Box<dyn ContainerSignature>],
) -> Result<Stream, LocationError> {
    let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    resolve_components(root, &components, wrappers, containers)
}

fn resolve_components(
    container: &mut dyn Container,
    components: &[&str],
    wrappers: &[Box<dyn WrapperSignature>],
    containers: &[Box<dyn ContainerSignature>],
) -> Result<Stream, LocationError> {
    if components.is_empty() {
        return Err(LocationError::NotFound(String::new()));
    }

    let head = components[0];
    let rest = &components[1..];

    if container.is_dir(head) {
        // Descend without opening a stream: directories have no wrapper or
        // container signature to apply.
        let mut entry = DirView { parent: container, prefix: head };
        return resolve_components(&mut entry, rest, wrappers, containers);
    }

    let mut stream = container
        .open(head)
        .map_err(|_| LocationError::NotFound(head.to_string()))?;

    // Unwrap every wrapper whose signature matches, in order; a wrapper
    // may apply more than once (e.g. a double-compressed stream).
    let mut matched_any = true;
    while matched_any {
        matched_any = false;
        for wrapper in wrappers {
            if wrapper.matches(&mut stream)? {
                stream = wrapper.unwrap(stream)?;
                matched_any = true;
                break;
            }
        }
    }

    for sig in containers {
        if sig.matches(&mut stream)? {
            let mut nested = sig.open(stream)?;
            return resolve_components(nested.as_mut(), rest, wrappers, containers);
        }
    }

    if rest.is_empty() {
        Ok(stream)
    } else {
        Err(LocationError::UnresolvedSubpath(rest.join("/")))
    }
}

/// A view of `parent` rooted at one of its subdirectories, so nested
/// directory traversal doesn't need its own [`Container`] impl.
struct DirView<'a> {
    parent: &'a mut dyn Container,
    prefix: &'a str,
}

impl Container for DirView<'_> {
    fn open(&mut self, subpath: &str) -> io::Result<Stream> {
        self.parent.open(&format!("{}/{}", self.prefix, subpath))
    }

    fn list(&self) -> io::Result<Vec<String>> {
        self.parent.list()
    }

    fn is_dir(&self, subpath: &str) -> bool {
        self.parent.is_dir(&format!("{}/{}", self.prefix, subpath))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn resolves_plain_file_in_directory() {
        let dir = std::env::temp_dir().join(format!("bitglyph-stream-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file_path = dir.join("leaf.txt");
        fs::File::create(&file_path).unwrap().write_all(b"hello").unwrap();

        let mut root = FsContainer::new(&dir);
        let mut stream = resolve(&mut root, "leaf.txt", &[], &[]).unwrap();
        assert_eq!(stream.read_to_string().unwrap(), "hello");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = std::env::temp_dir().join(format!("bitglyph-stream-test-missing-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut root = FsContainer::new(&dir);
        let err = resolve(&mut root, "nope.txt", &[], &[]).unwrap_err();
        assert!(matches!(err, LocationError::NotFound(_)));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn descends_through_subdirectories() {
        let dir = std::env::temp_dir().join(format!("bitglyph-stream-test-nested-{}", std::process::id()));
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::File::create(dir.join("sub/leaf.txt")).unwrap().write_all(b"nested").unwrap();

        let mut root = FsContainer::new(&dir);
        let mut stream = resolve(&mut root, "sub/leaf.txt", &[], &[]).unwrap();
        assert_eq!(stream.read_to_string().unwrap(), "nested");

        fs::remove_dir_all(&dir).unwrap();
    }
}
