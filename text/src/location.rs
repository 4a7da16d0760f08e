/// Source file location
/// Requires `SourceManager` to decode
#[derive(PartialEq, Eq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct SourceLocation(u32);

impl SourceLocation {
    /// Source location that represents an unknown source
    pub const UNKNOWN: SourceLocation = SourceLocation(u32::MAX);

    /// Create first source location
    pub fn first() -> Self {
        SourceLocation(0)
    }

    /// Add an offset to a source location
    /// Expects the offset to be within range of the stream
    pub fn offset(self, offset: u32) -> Self {
        if self == SourceLocation::UNKNOWN {
            self
        } else {
            SourceLocation(self.0 + offset)
        }
    }

    /// Get the raw integer inside the location
    pub fn get_raw(&self) -> u32 {
        self.0
    }
}

/// Owns all source files loaded into the compiler
pub struct SourceManager {
    files: Vec<SourceFile>,
    next_location: SourceLocation,
}

impl SourceManager {
    /// Create a new source manager with no files
    pub fn new() -> Self {
        SourceManager {
            files: Vec::new(),
            next_location: SourceLocation::first(),
        }
    }

    /// Add a file into the source manager
    pub fn add_file(&mut self, file_name: FileName, contents: String) -> FileId {
        assert!(contents.len() < u32::MAX as usize);
        assert!(self.files.len() < u32::MAX as usize);
        let file_id = FileId(self.files.len() as u32);
        let file_size = contents.len() as u32;
        self.files.push(SourceFile {
            file_name,
            file_size,
            contents,
            base_location: self.next_location,
        });
        // One extra slot past the contents is reserved for the end of file token
        self.next_location = self.next_location.offset(file_size + 1);
        file_id
    }

    /// Get the full source for a given file
    pub fn get_contents(&self, file_id: FileId) -> &str {
        &self.files[file_id.0 as usize].contents
    }

    /// Get the name a file was registered with
    pub fn get_file_name(&self, file_id: FileId) -> &FileName {
        &self.files[file_id.0 as usize].file_name
    }

    /// Get the source location from a certain position in a file
    pub fn get_source_location_from_file_offset(
        &self,
        file_id: FileId,
        stream_location: StreamLocation,
    ) -> SourceLocation {
        let source_file = &self.files[file_id.0 as usize];
        assert!(stream_location.0 < source_file.file_size + 1);
        source_file.base_location.offset(stream_location.0)
    }

    /// Find the file which contains a location and the offset of the location inside it
    fn locate(&self, source_location: SourceLocation) -> Option<(FileId, &SourceFile, u32)> {
        if source_location == SourceLocation::UNKNOWN {
            return None;
        }
        self.files.iter().enumerate().find_map(|(i, file)| {
            let start = file.base_location.0;
            let end = start + file.file_size + 1;
            if (start..end).contains(&source_location.0) {
                Some((FileId(i as u32), file, source_location.0 - start))
            } else {
                None
            }
        })
    }

    /// Get the file id and offset from a source location
    pub fn get_file_offset_from_source_location(
        &self,
        source_location: SourceLocation,
    ) -> Option<(FileId, StreamLocation)> {
        self.locate(source_location)
            .map(|(file_id, _, offset)| (file_id, StreamLocation(offset)))
    }

    /// Get the full file location information from a source location
    pub fn get_file_location(&self, source_location: SourceLocation) -> FileLocation {
        let (source_file, offset) = match self.locate(source_location) {
            Some((_, source_file, offset)) => (source_file, offset),
            None => return FileLocation::Unknown,
        };

        let mut line = Line::first();
        let mut column = Column::first();
        for c in &source_file.contents.as_bytes()[..(offset as usize)] {
            if *c == b'\n' {
                line.increment();
                column = Column::first();
            } else {
                column.increment();
            }
        }
        FileLocation::Known(source_file.file_name.clone(), line, column)
    }

    /// Print the source line around an error location with a marker under the failing column
    pub fn write_source_for_error(
        &self,
        f: &mut std::fmt::Formatter,
        source_location: Option<SourceLocation>,
    ) -> std::fmt::Result {
        let loc = match source_location {
            Some(loc) => loc,
            None => return writeln!(f, "No location available"),
        };

        let (source_file, offset) = match self.locate(loc) {
            Some((_, source_file, offset)) => (source_file, offset as usize),
            None => return writeln!(f, "Invalid source"),
        };

        let contents = source_file.contents.as_str();
        let (before, after) = contents.split_at(offset.min(contents.len()));
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = before.len() + after.find('\n').unwrap_or(after.len());
        writeln!(f, "{}", &contents[line_start..line_end])?;

        let column = offset - line_start;
        writeln!(f, "{:>width$}", "^", width = column + 1)
    }
}

impl Default for SourceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer for a single loaded file
struct SourceFile {
    file_name: FileName,
    file_size: u32,
    contents: String,
    base_location: SourceLocation,
}

/// A source file identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileId(u32);

/// A file used as an input
#[derive(PartialEq, Debug, Clone)]
pub struct FileName(pub String);

/// A line number in a file
#[derive(PartialEq, PartialOrd, Debug, Copy, Clone)]
pub struct Line(pub u32);

impl Line {
    /// Construct for the first line
    pub fn first() -> Self {
        Line(1)
    }

    /// Move to the next line
    pub fn increment(&mut self) {
        self.0 += 1
    }
}

/// The column index in a line
#[derive(PartialEq, PartialOrd, Debug, Copy, Clone)]
pub struct Column(pub u32);

impl Column {
    /// Construct for the first column
    pub fn first() -> Self {
        Column(1)
    }

    /// Move to the next column
    pub fn increment(&mut self) {
        self.0 += 1
    }
}

/// Fully qualified location
#[derive(PartialEq, Debug, Clone)]
pub enum FileLocation {
    Known(FileName, Line, Column),
    Unknown,
}

impl std::fmt::Display for FileLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            FileLocation::Known(file_name, line, column) => {
                write!(f, "{}:{}:{}", file_name.0, line.0, column.0)
            }
            FileLocation::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// The raw number of bytes from the start of a stream
#[derive(PartialEq, PartialOrd, Debug, Copy, Clone)]
pub struct StreamLocation(pub u32);

/// Wrapper to pair a node with a source location
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Located<T> {
    pub node: T,
    pub location: SourceLocation,
}

impl<T> Located<T> {
    /// Create a located object with a location
    pub fn new(node: T, loc: SourceLocation) -> Located<T> {
        Located {
            node,
            location: loc,
        }
    }

    /// Extract the node and discard the location
    pub fn to_node(self) -> T {
        self.node
    }

    /// Create a located object with no location
    pub fn none(node: T) -> Located<T> {
        Located {
            node,
            location: SourceLocation::UNKNOWN,
        }
    }
}

impl<T> std::ops::Deref for Located<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.node
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?} @ {}", self.node, self.location.get_raw())
    }
}

#[test]
fn test_file_location() {
    let mut source_manager = SourceManager::new();
    let first = source_manager.add_file(FileName("a.omegasl".to_string()), "ab\ncd".to_string());
    let second = source_manager.add_file(FileName("b.omegasl".to_string()), "xyz".to_string());

    let loc = source_manager.get_source_location_from_file_offset(first, StreamLocation(4));
    assert_eq!(
        source_manager.get_file_location(loc),
        FileLocation::Known(FileName("a.omegasl".to_string()), Line(2), Column(2))
    );

    let loc = source_manager.get_source_location_from_file_offset(second, StreamLocation(1));
    assert_eq!(loc, SourceLocation::first().offset(7));
    assert_eq!(
        source_manager.get_file_offset_from_source_location(loc),
        Some((second, StreamLocation(1)))
    );

    assert_eq!(
        source_manager.get_file_location(SourceLocation::UNKNOWN),
        FileLocation::Unknown
    );
}
