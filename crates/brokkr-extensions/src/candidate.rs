//! Candidate types announced during container scan
//!
//! A candidate couples the scanner's view of a registration (its type
//! descriptor) with a zero-argument factory that produces the actual
//! `PropertyConfigSource` instance. The factory replaces reflective
//! instantiation: construction is type-checked at registration time and
//! runs exactly once, during materialisation.

use brokkr_core::PropertyConfigSource;

/// Structural kind of a scanned type, as surfaced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete, instantiable class
    Class,
    /// An interface declaration
    Interface,
    /// An annotation type
    Annotation,
    /// An enumeration type
    Enum,
    /// An array type
    Array,
    /// A compiler-generated type
    Synthetic,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Annotation => "annotation",
            TypeKind::Enum => "enum",
            TypeKind::Array => "array",
            TypeKind::Synthetic => "synthetic",
        };
        write!(f, "{label}")
    }
}

/// Scanner-provided description of an announced type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully-qualified name of the announced type
    pub name: String,

    /// Structural kind of the announced type
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Zero-argument producer of a user config source.
///
/// Runs at most once; a failure here is fatal to the deployment.
pub type SourceFactory = Box<
    dyn FnOnce() -> std::result::Result<
        Box<dyn PropertyConfigSource>,
        Box<dyn std::error::Error + Send + Sync>,
    >,
>;

/// One announced registration: descriptor plus factory
pub struct SourceCandidate {
    /// The scanner's descriptor for this registration
    pub descriptor: TypeDescriptor,

    /// Factory consumed during materialisation
    pub factory: SourceFactory,
}

impl SourceCandidate {
    /// Create a candidate for a concrete class registration
    pub fn new(name: impl Into<String>, factory: SourceFactory) -> Self {
        Self {
            descriptor: TypeDescriptor::new(name, TypeKind::Class),
            factory,
        }
    }

    /// Create a candidate with an explicit kind, for scanners that also
    /// surface non-instantiable declarations
    pub fn with_kind(name: impl Into<String>, kind: TypeKind, factory: SourceFactory) -> Self {
        Self {
            descriptor: TypeDescriptor::new(name, kind),
            factory,
        }
    }
}

impl std::fmt::Debug for SourceCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCandidate")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
