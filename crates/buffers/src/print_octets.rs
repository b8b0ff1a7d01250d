//! Hex previews of wire bytes for log lines and error reports.

/// Formats at most `max` bytes of `octets` as space-separated hex.
///
/// Anything past `max` is summarised as a byte count so a large payload
/// never floods a log line.
///
/// # Example
///
/// ```
/// use wirecodec_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x08, 0x01, 0x12], 16), "08 01 12");
/// assert_eq!(print_octets(&[0x08, 0x01, 0x12], 2), "08 01 ... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let shown: Vec<String> = octets
        .iter()
        .take(max)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    let mut result = shown.join(" ");
    if octets.len() > max {
        result.push_str(&format!(" ... ({} more)", octets.len() - max));
    }
    result
}

/// Formats a byte slice with the default cap of 32 bytes.
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, 32)
}
