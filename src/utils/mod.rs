pub fn set_bit(data:&mut u16, bit_position:u16) {
    *data |= 1 << bit_position;
}

pub fn clear_bit(data:&mut u16, bit_position:u16) {
    *data &= 0xFFFF ^ (1 << bit_position);
}

pub fn get_bit(data:&u16, bit_position:u16) -> bool {
    (data & (1 << bit_position)) > 0
}

/**
 * Parses an address or value written either in decimal or with a 0x prefix,
 * e.g. "256", "0x0100" and "-5" are all accepted.
 */
pub fn parse_number(text:&str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -value } else { value })
}
