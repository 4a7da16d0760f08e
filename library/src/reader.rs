use crate::writer::LAYOUT_RECORD_SIZE;
use crate::*;
use log::debug;
use std::io::Read;

/// Cursor over library bytes that fails instead of reading past the end
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf }
    }

    fn read_n(&mut self, n: u64) -> Result<&'a [u8]> {
        let remaining = self.buf.len();
        match usize::try_from(n) {
            Ok(len) if len <= remaining => {
                let (read, rest) = self.buf.split_at(len);
                self.buf = rest;
                Ok(read)
            }
            _ => Err(LibraryError::Truncated {
                needed: n,
                remaining,
            }),
        }
    }

    fn read_const<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_n(N as u64)?;
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_const::<1>()?[0])
    }

    fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(LibraryError::InvalidBool { field, value }),
        }
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_const()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_const()?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_const()?))
    }

    /// Read a tag and map it onto its enum value
    fn read_tag<T>(&mut self, field: &'static str, from_tag: fn(i32) -> Option<T>) -> Result<T> {
        let value = self.read_i32()?;
        from_tag(value).ok_or(LibraryError::InvalidTag { field, value })
    }

    fn read_blob(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u64()?;
        self.read_n(len)
    }

    fn read_string(&mut self, field: &'static str) -> Result<String> {
        let bytes = self.read_blob()?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| LibraryError::InvalidUtf8 { field })
    }

    fn remaining(&self) -> usize {
        self.buf.len()
    }
}

fn read_layout_entry(r: &mut Reader) -> Result<LayoutEntry> {
    let kind = r.read_tag("layout kind", LayoutKind::from_tag)?;
    let backend_slot = r.read_u32()?;
    let io_mode = r.read_tag("layout io mode", IoMode::from_tag)?;
    let register = r.read_u64()?;
    let offset = r.read_u64()?;

    let has_sampler = r.read_bool("layout sampler flag")?;
    let filter = r.read_i32()?;
    let u_address_mode = r.read_i32()?;
    let v_address_mode = r.read_i32()?;
    let w_address_mode = r.read_i32()?;
    let max_anisotropy = r.read_u32()?;
    let sampler = if has_sampler {
        let address_mode = |value| {
            AddressMode::from_tag(value).ok_or(LibraryError::InvalidTag {
                field: "sampler address mode",
                value,
            })
        };
        Some(StaticSamplerDesc {
            filter: SamplerFilter::from_tag(filter).ok_or(LibraryError::InvalidTag {
                field: "sampler filter",
                value: filter,
            })?,
            u_address_mode: address_mode(u_address_mode)?,
            v_address_mode: address_mode(v_address_mode)?,
            w_address_mode: address_mode(w_address_mode)?,
            max_anisotropy,
        })
    } else {
        None
    };

    let has_constant = r.read_bool("layout constant flag")?;
    let data_type = r.read_i32()?;
    let bits = r.read_u64()?;
    let constant = if has_constant {
        let data_type = DataType::from_tag(data_type).ok_or(LibraryError::InvalidTag {
            field: "constant data type",
            value: data_type,
        })?;
        Some(ConstantDesc::from_bits(data_type, bits))
    } else {
        None
    };

    Ok(LayoutEntry {
        kind,
        io_mode,
        backend_slot,
        register,
        offset,
        sampler,
        constant,
    })
}

fn read_entry(r: &mut Reader) -> Result<ShaderEntry> {
    let stage = r.read_tag("shader stage", ShaderStage::from_tag)?;
    let name = r.read_string("shader name")?;
    let bytecode = r.read_blob()?.to_vec();

    let layout_count = r.read_u32()?;
    let layout_bytes = layout_count as u64 * LAYOUT_RECORD_SIZE as u64;
    if layout_bytes > r.remaining() as u64 {
        return Err(LibraryError::Truncated {
            needed: layout_bytes,
            remaining: r.remaining(),
        });
    }
    let mut layout = Vec::with_capacity(layout_count as usize);
    for _ in 0..layout_count {
        layout.push(read_layout_entry(r)?);
    }

    let stage = match stage {
        ShaderStage::Vertex => {
            let uses_vertex_id = r.read_bool("vertex id flag")?;
            let param_count = r.read_u32()?;
            let mut params = Vec::new();
            for _ in 0..param_count {
                params.push(VertexParam {
                    name: r.read_string("vertex param name")?,
                    data_type: r.read_tag("vertex param type", DataType::from_tag)?,
                    offset: r.read_u64()?,
                });
            }
            StageDesc::Vertex(VertexInputDesc {
                uses_vertex_id,
                params,
            })
        }
        ShaderStage::Fragment => StageDesc::Fragment,
        ShaderStage::Compute => StageDesc::Compute(ThreadgroupDesc {
            x: r.read_u32()?,
            y: r.read_u32()?,
            z: r.read_u32()?,
        }),
    };

    Ok(ShaderEntry {
        name,
        stage,
        bytecode,
        layout,
    })
}

impl ShaderLibrary {
    /// Parse a complete library from a byte buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<ShaderLibrary> {
        let mut r = Reader::new(bytes);
        let name = r.read_string("library name")?;
        let entry_count = r.read_u32()?;
        let mut entries = Vec::new();
        for _ in 0..entry_count {
            entries.push(read_entry(&mut r)?);
        }
        if r.remaining() != 0 {
            return Err(LibraryError::TrailingBytes(r.remaining()));
        }
        Ok(ShaderLibrary { name, entries })
    }

    /// Read a complete library from a reader
    pub fn read_from(r: &mut impl Read) -> Result<ShaderLibrary> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Load a library file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<ShaderLibrary> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let library = Self::from_bytes(&bytes)?;
        debug!(
            "loaded shader library '{}' ({} entries) from {}",
            library.name,
            library.entries.len(),
            path.display()
        );
        Ok(library)
    }
}

#[cfg(test)]
fn sample_library() -> ShaderLibrary {
    ShaderLibrary {
        name: "out/shaders.omegasllib".to_string(),
        entries: vec![
            ShaderEntry {
                name: "vertexMain".to_string(),
                stage: StageDesc::Vertex(VertexInputDesc {
                    uses_vertex_id: true,
                    params: vec![
                        VertexParam {
                            name: "pos".to_string(),
                            data_type: DataType::Float4,
                            offset: 0,
                        },
                        VertexParam {
                            name: "uv".to_string(),
                            data_type: DataType::Float2,
                            offset: 16,
                        },
                    ],
                }),
                bytecode: b"vs bytes".to_vec(),
                layout: vec![LayoutEntry {
                    kind: LayoutKind::Buffer,
                    io_mode: IoMode::In,
                    backend_slot: 0,
                    register: 0,
                    offset: 0,
                    sampler: None,
                    constant: None,
                }],
            },
            ShaderEntry {
                name: "fragMain".to_string(),
                stage: StageDesc::Fragment,
                bytecode: Vec::new(),
                layout: vec![
                    LayoutEntry {
                        kind: LayoutKind::Texture2d,
                        io_mode: IoMode::In,
                        backend_slot: 0,
                        register: 1,
                        offset: 0,
                        sampler: None,
                        constant: None,
                    },
                    LayoutEntry {
                        kind: LayoutKind::StaticSampler2d,
                        io_mode: IoMode::In,
                        backend_slot: 0,
                        register: 2,
                        offset: 0,
                        sampler: Some(StaticSamplerDesc {
                            filter: SamplerFilter::Point,
                            u_address_mode: AddressMode::Mirror,
                            v_address_mode: AddressMode::ClampToEdge,
                            w_address_mode: AddressMode::MirrorWrap,
                            max_anisotropy: 4,
                        }),
                        constant: None,
                    },
                    LayoutEntry {
                        kind: LayoutKind::Constant,
                        io_mode: IoMode::In,
                        backend_slot: 1,
                        register: 3,
                        offset: 8,
                        sampler: None,
                        constant: Some(ConstantDesc::float(0.25)),
                    },
                ],
            },
            ShaderEntry {
                name: "computeMain".to_string(),
                stage: StageDesc::Compute(ThreadgroupDesc { x: 64, y: 1, z: 1 }),
                bytecode: vec![1, 2, 3, 4],
                layout: vec![LayoutEntry {
                    kind: LayoutKind::Texture3d,
                    io_mode: IoMode::Inout,
                    backend_slot: 0,
                    register: 4,
                    offset: 0,
                    sampler: None,
                    constant: None,
                }],
            },
        ],
    }
}

#[test]
fn test_read_written_library() {
    let library = sample_library();
    let bytes = library.to_bytes().expect("write failed");
    assert_eq!(
        ShaderLibrary::from_bytes(&bytes).expect("read failed"),
        library
    );

    let mut cursor = std::io::Cursor::new(bytes);
    assert_eq!(
        ShaderLibrary::read_from(&mut cursor).expect("read failed"),
        library
    );
}

#[test]
fn test_read_written_constants() {
    let constant = |register: u64, constant: ConstantDesc| LayoutEntry {
        kind: LayoutKind::Constant,
        io_mode: IoMode::In,
        backend_slot: register as u32,
        register,
        offset: 0,
        sampler: None,
        constant: Some(constant),
    };
    let families = [
        (DataType::Int2, ConstantValue::Int(-7)),
        (DataType::Uint3, ConstantValue::UInt(u32::MAX)),
        (DataType::Float4, ConstantValue::Float(-0.125)),
        (DataType::Float4x4, ConstantValue::Float(3.0)),
        (DataType::Double, ConstantValue::Double(1.0e300)),
    ];

    let mut layout = vec![
        constant(0, ConstantDesc::int(7)),
        constant(1, ConstantDesc::uint(7)),
        constant(2, ConstantDesc::float(7.0)),
        constant(3, ConstantDesc::double(7.0)),
    ];
    for (i, (data_type, value)) in families.into_iter().enumerate() {
        let desc = ConstantDesc::new(data_type, value).expect("value does not fit its type");
        layout.push(constant(4 + i as u64, desc));
    }

    let library = ShaderLibrary {
        name: "constants".to_string(),
        entries: vec![ShaderEntry {
            name: "main".to_string(),
            stage: StageDesc::Fragment,
            bytecode: Vec::new(),
            layout,
        }],
    };
    let bytes = library.to_bytes().expect("write failed");
    assert_eq!(
        ShaderLibrary::from_bytes(&bytes).expect("read failed"),
        library
    );

    // A value can not be paired with a type from another family
    assert_eq!(
        ConstantDesc::new(DataType::Float4, ConstantValue::Int(7)),
        None
    );
}

#[test]
fn test_truncated_library() {
    let bytes = sample_library().to_bytes().expect("write failed");
    // Every strict prefix must be rejected rather than producing a partial library
    for len in 0..bytes.len() {
        match ShaderLibrary::from_bytes(&bytes[..len]) {
            Err(LibraryError::Truncated { .. }) => {}
            other => panic!("prefix of {} bytes gave {:?}", len, other),
        }
    }
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = sample_library().to_bytes().expect("write failed");
    bytes.push(0);
    assert!(matches!(
        ShaderLibrary::from_bytes(&bytes),
        Err(LibraryError::TrailingBytes(1))
    ));
}

#[test]
fn test_invalid_values() {
    let library = ShaderLibrary {
        name: "l".to_string(),
        entries: vec![ShaderEntry {
            name: "f".to_string(),
            stage: StageDesc::Fragment,
            bytecode: Vec::new(),
            layout: Vec::new(),
        }],
    };
    let bytes = library.to_bytes().expect("write failed");

    // Stage tag directly follows the 8 byte name length, the name and the 4 byte entry count
    let stage_offset = 8 + 1 + 4;
    let mut bad_stage = bytes.clone();
    bad_stage[stage_offset..stage_offset + 4].copy_from_slice(&7i32.to_le_bytes());
    assert!(matches!(
        ShaderLibrary::from_bytes(&bad_stage),
        Err(LibraryError::InvalidTag {
            field: "shader stage",
            value: 7
        })
    ));

    let mut bad_name = bytes;
    bad_name[8] = 0xFF;
    assert!(matches!(
        ShaderLibrary::from_bytes(&bad_name),
        Err(LibraryError::InvalidUtf8 { .. })
    ));
}

#[test]
fn test_invalid_bool() {
    let library = ShaderLibrary {
        name: String::new(),
        entries: vec![ShaderEntry {
            name: String::new(),
            stage: StageDesc::Vertex(VertexInputDesc::default()),
            bytecode: Vec::new(),
            layout: Vec::new(),
        }],
    };
    let mut bytes = library.to_bytes().expect("write failed");
    // The vertex id flag sits right after the empty layout count
    let flag_offset = 8 + 4 + 4 + 8 + 8 + 4;
    assert_eq!(bytes[flag_offset], 0);
    bytes[flag_offset] = 2;
    assert!(matches!(
        ShaderLibrary::from_bytes(&bytes),
        Err(LibraryError::InvalidBool { value: 2, .. })
    ));
}
