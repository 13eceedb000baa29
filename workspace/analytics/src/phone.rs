/// Normalize phone-field text to a `+`-prefixed digit string.
///
/// Every non-digit is dropped, including a typed `+`, which is then put back
/// in front of any remaining digits.
pub fn mask_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return digits;
    }
    format!("+{}", digits)
}
