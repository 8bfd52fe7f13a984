//! Print file progress trait

/// Trait for the active print file reader
pub trait PrintSource {
    /// Bytes consumed so far
    fn bytes_read(&self) -> u32;

    /// Total file size in bytes
    fn total_bytes(&self) -> u32;

    /// Human-readable name of the active file
    fn display_name(&self) -> &str;
}
