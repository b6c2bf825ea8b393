//! Typed, counted views into buffer data.

/// Component numeric type of an accessor, using the GPU type codes
/// shared by glTF and OpenGL (`5120`..`5126`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Signed 8-bit integer (code 5120).
    Byte,
    /// Unsigned 8-bit integer (code 5121).
    UnsignedByte,
    /// Signed 16-bit integer (code 5122).
    Short,
    /// Unsigned 16-bit integer (code 5123).
    UnsignedShort,
    /// Unsigned 32-bit integer (code 5125).
    UnsignedInt,
    /// 32-bit IEEE float (code 5126).
    Float,
}

impl ComponentType {
    /// The numeric GPU type code for this component type.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Byte => 5120,
            Self::UnsignedByte => 5121,
            Self::Short => 5122,
            Self::UnsignedShort => 5123,
            Self::UnsignedInt => 5125,
            Self::Float => 5126,
        }
    }

    /// Look up a component type from its GPU type code.
    ///
    /// Returns `None` for unknown codes (including 5124, which glTF
    /// does not allow).
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(Self::Byte),
            5121 => Some(Self::UnsignedByte),
            5122 => Some(Self::Short),
            5123 => Some(Self::UnsignedShort),
            5125 => Some(Self::UnsignedInt),
            5126 => Some(Self::Float),
            _ => None,
        }
    }

    /// Size of one component in bytes.
    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::UnsignedInt | Self::Float => 4,
        }
    }
}

/// Element shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorType {
    /// One component per element.
    Scalar,
    /// Two components per element.
    Vec2,
    /// Three components per element.
    Vec3,
    /// Four components per element.
    Vec4,
}

impl AccessorType {
    /// Number of components per element.
    #[must_use]
    pub const fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }
}

/// A typed, counted view into a buffer view.
///
/// Accessors sharing a buffer view are assumed to index a common,
/// zero-based, contiguous vertex range.
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Index of the buffer view holding this accessor's data, if any.
    pub buffer_view: Option<usize>,

    /// Byte offset of the first element within the buffer view.
    pub byte_offset: usize,

    /// Numeric type of each component.
    pub component_type: ComponentType,

    /// Number of elements.
    pub count: usize,

    /// Shape of each element.
    pub accessor_type: AccessorType,

    /// Per-component minimum values, if recorded.
    pub min: Option<Vec<f64>>,

    /// Per-component maximum values, if recorded.
    pub max: Option<Vec<f64>>,
}

impl Accessor {
    /// Create a scalar accessor over a buffer view.
    #[must_use]
    pub const fn scalar(buffer_view: usize, component_type: ComponentType, count: usize) -> Self {
        Self {
            buffer_view: Some(buffer_view),
            byte_offset: 0,
            component_type,
            count,
            accessor_type: AccessorType::Scalar,
            min: None,
            max: None,
        }
    }

    /// Create a 3-component float accessor over a buffer view.
    #[must_use]
    pub const fn vec3_f32(buffer_view: usize, count: usize) -> Self {
        Self {
            buffer_view: Some(buffer_view),
            byte_offset: 0,
            component_type: ComponentType::Float,
            count,
            accessor_type: AccessorType::Vec3,
            min: None,
            max: None,
        }
    }

    /// Size of one element in bytes (components x component size).
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.component_type.byte_size() * self.accessor_type.component_count()
    }

    /// Total bytes of tightly packed element data.
    #[must_use]
    pub const fn byte_length(&self) -> usize {
        self.element_size() * self.count
    }
}
