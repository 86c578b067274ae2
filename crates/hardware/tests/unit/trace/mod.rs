
/// Line iteration, skipping, and I/O failure handling.
pub mod reader;
