/// Open Packaging Conventions (OPC) container access.
///
/// An OOXML file is a ZIP archive of named parts. This module opens the
/// archive in memory and reads individual members by name.
///
/// # Performance Features
///
/// - Uses `atoi_simd` for fast integer parsing of part numbers
/// - Reads the archive into memory once; members are inflated on demand

pub mod constants;
pub mod phys_pkg;

// Re-export commonly used types
pub use phys_pkg::ArchiveHandle;
