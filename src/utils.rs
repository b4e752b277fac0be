/// Formats bytes as uppercase hexadecimal pairs separated by spaces.
pub(crate) fn format_hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<empty>".to_string();
    }

    let mut rendered = String::with_capacity(bytes.len().saturating_mul(3));
    for (index, value) in bytes.iter().enumerate() {
        if index > 0 {
            rendered.push(' ');
        }
        let high = value >> 4;
        let low = value & 0x0F;
        rendered.push(nibble_to_hex(high));
        rendered.push(nibble_to_hex(low));
    }
    rendered
}

fn nibble_to_hex(value: u8) -> char {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    HEX[value as usize] as char
}
