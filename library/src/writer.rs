use crate::*;
use log::debug;
use std::io::Write;

/// Size of a single layout record in the library format
pub(crate) const LAYOUT_RECORD_SIZE: usize = 62;

fn write_u8(w: &mut impl Write, v: u8) -> Result<()> {
    Ok(w.write_all(&[v])?)
}

fn write_bool(w: &mut impl Write, v: bool) -> Result<()> {
    write_u8(w, v as u8)
}

fn write_i32(w: &mut impl Write, v: i32) -> Result<()> {
    Ok(w.write_all(&v.to_le_bytes())?)
}

fn write_u32(w: &mut impl Write, v: u32) -> Result<()> {
    Ok(w.write_all(&v.to_le_bytes())?)
}

fn write_u64(w: &mut impl Write, v: u64) -> Result<()> {
    Ok(w.write_all(&v.to_le_bytes())?)
}

/// Write a u64 length prefix followed by the raw bytes
fn write_blob(w: &mut impl Write, bytes: &[u8]) -> Result<()> {
    write_u64(w, bytes.len() as u64)?;
    Ok(w.write_all(bytes)?)
}

/// Write a u32 element count
fn write_count(w: &mut impl Write, count: usize, what: &'static str) -> Result<()> {
    let count = u32::try_from(count).map_err(|_| LibraryError::TooMany(what))?;
    write_u32(w, count)
}

fn write_layout_entry(w: &mut impl Write, entry: &LayoutEntry) -> Result<()> {
    write_i32(w, entry.kind.tag())?;
    write_u32(w, entry.backend_slot)?;
    write_i32(w, entry.io_mode.tag())?;
    write_u64(w, entry.register)?;
    write_u64(w, entry.offset)?;

    // Absent descriptors still occupy their space in the record
    write_bool(w, entry.sampler.is_some())?;
    let sampler = entry.sampler.unwrap_or_default();
    write_i32(w, sampler.filter.tag())?;
    write_i32(w, sampler.u_address_mode.tag())?;
    write_i32(w, sampler.v_address_mode.tag())?;
    write_i32(w, sampler.w_address_mode.tag())?;
    write_u32(w, sampler.max_anisotropy)?;

    write_bool(w, entry.constant.is_some())?;
    match &entry.constant {
        Some(constant) => {
            write_i32(w, constant.data_type().tag())?;
            write_u64(w, constant.value().to_bits())
        }
        None => {
            write_i32(w, DataType::Int.tag())?;
            write_u64(w, 0)
        }
    }
}

fn write_entry(w: &mut impl Write, entry: &ShaderEntry) -> Result<()> {
    write_i32(w, entry.stage.stage().tag())?;
    write_blob(w, entry.name.as_bytes())?;
    write_blob(w, &entry.bytecode)?;

    write_count(w, entry.layout.len(), "layout entries")?;
    for layout in &entry.layout {
        write_layout_entry(w, layout)?;
    }

    match &entry.stage {
        StageDesc::Vertex(input) => {
            write_bool(w, input.uses_vertex_id)?;
            write_count(w, input.params.len(), "vertex params")?;
            for param in &input.params {
                write_blob(w, param.name.as_bytes())?;
                write_i32(w, param.data_type.tag())?;
                write_u64(w, param.offset)?;
            }
        }
        StageDesc::Fragment => {}
        StageDesc::Compute(threadgroup) => {
            write_u32(w, threadgroup.x)?;
            write_u32(w, threadgroup.y)?;
            write_u32(w, threadgroup.z)?;
        }
    }
    Ok(())
}

impl ShaderLibrary {
    /// Serialize the library into a writer
    pub fn write_to(&self, w: &mut impl Write) -> Result<()> {
        write_blob(w, self.name.as_bytes())?;
        write_count(w, self.entries.len(), "shader entries")?;
        for entry in &self.entries {
            write_entry(w, entry)?;
        }
        Ok(())
    }

    /// Serialize the library into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the library to a file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        debug!(
            "wrote shader library '{}' ({} entries, {} bytes) to {}",
            self.name,
            self.entries.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

#[test]
fn test_header_layout() {
    let library = ShaderLibrary {
        name: "lib".to_string(),
        entries: vec![ShaderEntry {
            name: "cs".to_string(),
            stage: StageDesc::Compute(ThreadgroupDesc { x: 8, y: 4, z: 1 }),
            bytecode: vec![0xAB],
            layout: Vec::new(),
        }],
    };
    let bytes = library.to_bytes().expect("write failed");

    let mut expected = Vec::new();
    expected.extend_from_slice(&3u64.to_le_bytes());
    expected.extend_from_slice(b"lib");
    expected.extend_from_slice(&1u32.to_le_bytes());
    expected.extend_from_slice(&2i32.to_le_bytes());
    expected.extend_from_slice(&2u64.to_le_bytes());
    expected.extend_from_slice(b"cs");
    expected.extend_from_slice(&1u64.to_le_bytes());
    expected.push(0xAB);
    expected.extend_from_slice(&0u32.to_le_bytes());
    expected.extend_from_slice(&8u32.to_le_bytes());
    expected.extend_from_slice(&4u32.to_le_bytes());
    expected.extend_from_slice(&1u32.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn test_layout_record_size() {
    let entry = LayoutEntry {
        kind: LayoutKind::Buffer,
        io_mode: IoMode::In,
        backend_slot: 0,
        register: 0,
        offset: 0,
        sampler: None,
        constant: None,
    };
    let mut bytes = Vec::new();
    write_layout_entry(&mut bytes, &entry).expect("write failed");
    assert_eq!(bytes.len(), LAYOUT_RECORD_SIZE);
}
