/// Declares a field-less enum that is stored as an `i32` tag in the library format
macro_rules! tagged_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $tag:expr ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $name {
            /// Every value in tag order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),*];

            /// Integer tag written into the library
            pub fn tag(self) -> i32 {
                match self {
                    $( $name::$variant => $tag ),*
                }
            }

            /// Find the value for a tag read from a library
            pub fn from_tag(tag: i32) -> Option<$name> {
                Self::ALL.iter().copied().find(|v| v.tag() == tag)
            }
        }
    };
}

tagged_enum! {
    /// Pipeline stage a shader entry runs in
    ShaderStage {
        Vertex = 0,
        Fragment = 1,
        Compute = 2,
    }
}

tagged_enum! {
    /// Access a shader is granted to a resource
    IoMode {
        In = 0,
        Out = 1,
        Inout = 2,
    }
}

tagged_enum! {
    /// Kind of binding described by a layout entry
    LayoutKind {
        Constant = 0,
        Buffer = 1,
        Texture1d = 2,
        Texture2d = 3,
        Texture3d = 4,
        Sampler1d = 5,
        Sampler2d = 6,
        Sampler3d = 7,
        StaticSampler1d = 8,
        StaticSampler2d = 9,
        StaticSampler3d = 10,
    }
}

tagged_enum! {
    SamplerFilter {
        Linear = 0,
        Point = 1,
        MaxAnisotropy = 2,
        MinAnisotropy = 3,
    }
}

tagged_enum! {
    AddressMode {
        ClampToEdge = 0,
        Wrap = 1,
        Mirror = 2,
        MirrorWrap = 3,
    }
}

tagged_enum! {
    /// Scalar, vector and matrix data types visible to the host
    DataType {
        Int = 0,
        Int2 = 1,
        Int3 = 2,
        Int4 = 3,
        Uint = 4,
        Uint2 = 5,
        Uint3 = 6,
        Uint4 = 7,
        Float = 8,
        Float2 = 9,
        Float3 = 10,
        Float4 = 11,
        Float2x1 = 12,
        Float2x2 = 13,
        Float2x3 = 14,
        Float2x4 = 15,
        Float3x1 = 16,
        Float3x2 = 17,
        Float3x3 = 18,
        Float3x4 = 19,
        Float4x1 = 20,
        Float4x2 = 21,
        Float4x3 = 22,
        Float4x4 = 23,
        Double = 24,
        Double2 = 25,
        Double3 = 26,
        Double4 = 27,
    }
}

impl DataType {
    /// Size in bytes of a value of this type when tightly packed
    pub fn size_in_bytes(self) -> u64 {
        use DataType::*;
        match self {
            Int | Uint | Float => 4,
            Int2 | Uint2 | Float2 | Float2x1 => 8,
            Int3 | Uint3 | Float3 | Float3x1 => 12,
            Int4 | Uint4 | Float4 | Float4x1 | Float2x2 => 16,
            Float2x3 | Float3x2 => 24,
            Float2x4 | Float4x2 => 32,
            Float3x3 => 36,
            Float3x4 | Float4x3 => 48,
            Float4x4 => 64,
            Double => 8,
            Double2 => 16,
            Double3 => 24,
            Double4 => 32,
        }
    }
}

/// Fixed sampler state baked into a shader
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub struct StaticSamplerDesc {
    pub filter: SamplerFilter,
    pub u_address_mode: AddressMode,
    pub v_address_mode: AddressMode,
    pub w_address_mode: AddressMode,
    pub max_anisotropy: u32,
}

impl Default for StaticSamplerDesc {
    fn default() -> Self {
        StaticSamplerDesc {
            filter: SamplerFilter::Linear,
            u_address_mode: AddressMode::Wrap,
            v_address_mode: AddressMode::Wrap,
            w_address_mode: AddressMode::Wrap,
            max_anisotropy: 16,
        }
    }
}

/// Scalar payload of an inline constant
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum ConstantValue {
    Int(i32),
    UInt(u32),
    Float(f32),
    Double(f64),
}

impl ConstantValue {
    /// Raw bits as stored in the 64 bit value slot of a layout record
    pub fn to_bits(self) -> u64 {
        match self {
            ConstantValue::Int(i) => i as u32 as u64,
            ConstantValue::UInt(u) => u as u64,
            ConstantValue::Float(f) => f.to_bits() as u64,
            ConstantValue::Double(d) => d.to_bits(),
        }
    }

    /// Check the value has the scalar family of a data type
    pub fn fits(self, data_type: DataType) -> bool {
        std::mem::discriminant(&ConstantValue::from_bits(data_type, 0))
            == std::mem::discriminant(&self)
    }

    /// Interpret the raw value slot using the constant's declared type
    fn from_bits(data_type: DataType, bits: u64) -> ConstantValue {
        use DataType::*;
        match data_type {
            Int | Int2 | Int3 | Int4 => ConstantValue::Int(bits as u32 as i32),
            Uint | Uint2 | Uint3 | Uint4 => ConstantValue::UInt(bits as u32),
            Double | Double2 | Double3 | Double4 => ConstantValue::Double(f64::from_bits(bits)),
            _ => ConstantValue::Float(f32::from_bits(bits as u32)),
        }
    }
}

/// Inline constant bound to a layout slot
///
/// The value always belongs to the scalar family of the data type.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct ConstantDesc {
    data_type: DataType,
    value: ConstantValue,
}

impl ConstantDesc {
    /// Pair a value with a data type of the same scalar family
    pub fn new(data_type: DataType, value: ConstantValue) -> Option<Self> {
        if value.fits(data_type) {
            Some(ConstantDesc { data_type, value })
        } else {
            None
        }
    }

    /// Rebuild a constant from the fields of a layout record
    pub fn from_bits(data_type: DataType, bits: u64) -> Self {
        ConstantDesc {
            data_type,
            value: ConstantValue::from_bits(data_type, bits),
        }
    }

    pub fn int(i: i32) -> Self {
        ConstantDesc {
            data_type: DataType::Int,
            value: ConstantValue::Int(i),
        }
    }

    pub fn uint(u: u32) -> Self {
        ConstantDesc {
            data_type: DataType::Uint,
            value: ConstantValue::UInt(u),
        }
    }

    pub fn float(f: f32) -> Self {
        ConstantDesc {
            data_type: DataType::Float,
            value: ConstantValue::Float(f),
        }
    }

    pub fn double(d: f64) -> Self {
        ConstantDesc {
            data_type: DataType::Double,
            value: ConstantValue::Double(d),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn value(&self) -> ConstantValue {
        self.value
    }
}

/// Describes how one resource binding maps onto a backend register
#[derive(PartialEq, Debug, Clone)]
pub struct LayoutEntry {
    /// Type of resource bound
    pub kind: LayoutKind,

    /// Access the shader has to the resource
    pub io_mode: IoMode,

    /// Slot index relative to the backend's register class
    pub backend_slot: u32,

    /// Register number given to the resource in the source
    pub register: u64,

    /// Byte offset of the binding inside its container
    pub offset: u64,

    /// Sampler state for static samplers
    pub sampler: Option<StaticSamplerDesc>,

    /// Value for inline constants
    pub constant: Option<ConstantDesc>,
}

/// Vertex attribute consumed by a vertex shader
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct VertexParam {
    pub name: String,
    pub data_type: DataType,
    pub offset: u64,
}

/// Inputs consumed by a vertex shader
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct VertexInputDesc {
    pub uses_vertex_id: bool,
    pub params: Vec<VertexParam>,
}

/// Threadgroup size of a compute shader
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub struct ThreadgroupDesc {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Stage of a shader entry along with the reflection data only that stage carries
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum StageDesc {
    Vertex(VertexInputDesc),
    Fragment,
    Compute(ThreadgroupDesc),
}

impl StageDesc {
    pub fn stage(&self) -> ShaderStage {
        match self {
            StageDesc::Vertex(_) => ShaderStage::Vertex,
            StageDesc::Fragment => ShaderStage::Fragment,
            StageDesc::Compute(_) => ShaderStage::Compute,
        }
    }
}

/// A single compiled shader with its reflection data
#[derive(PartialEq, Debug, Clone)]
pub struct ShaderEntry {
    /// Entry point name
    pub name: String,

    /// Stage and stage specific reflection
    pub stage: StageDesc,

    /// Backend bytecode or source blob
    pub bytecode: Vec<u8>,

    /// Resource bindings in declaration order
    pub layout: Vec<LayoutEntry>,
}

/// All shaders linked from one compilation unit
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ShaderLibrary {
    pub name: String,
    pub entries: Vec<ShaderEntry>,
}

impl ShaderLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        ShaderLibrary {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Find an entry by its entry point name
    pub fn find(&self, name: &str) -> Option<&ShaderEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

#[test]
fn test_tags() {
    assert_eq!(ShaderStage::from_tag(2), Some(ShaderStage::Compute));
    assert_eq!(ShaderStage::from_tag(3), None);
    assert_eq!(LayoutKind::StaticSampler2d.tag(), 9);
    assert_eq!(DataType::Float4x4.tag(), 23);
    assert_eq!(DataType::from_tag(27), Some(DataType::Double4));
    assert_eq!(DataType::ALL.len(), 28);
    assert_eq!(AddressMode::from_tag(-1), None);
}

#[test]
fn test_constant_bits() {
    let f = ConstantDesc::float(1.5);
    assert_eq!(
        ConstantDesc::from_bits(f.data_type(), f.value().to_bits()),
        f
    );
    let i = ConstantDesc::int(-3);
    assert_eq!(i.value().to_bits(), 0xFFFF_FFFD);
    assert_eq!(
        ConstantDesc::from_bits(i.data_type(), i.value().to_bits()),
        i
    );
}

#[test]
fn test_constant_pairing() {
    assert_eq!(
        ConstantDesc::new(DataType::Float4, ConstantValue::Int(7)),
        None
    );
    assert_eq!(
        ConstantDesc::new(DataType::Int3, ConstantValue::Float(1.0)),
        None
    );
    assert_eq!(
        ConstantDesc::new(DataType::Uint, ConstantValue::Int(1)),
        None
    );
    let desc = ConstantDesc::new(DataType::Int4, ConstantValue::Int(7)).expect("int4 takes ints");
    assert_eq!(desc.data_type(), DataType::Int4);
    assert_eq!(desc.value(), ConstantValue::Int(7));
}
