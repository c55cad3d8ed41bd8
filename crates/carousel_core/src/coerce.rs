//! Integer coercion for host-supplied indices and deltas
//!
//! Hosts hand the carousel whatever they have: typed integers from code,
//! floats from layout math, strings from markup attributes. Everything goes
//! through [`IntoIndex`] so the navigation layer only ever sees `i64`.

/// Values that can be coerced into a navigation integer
///
/// `None` means the value is not a number and the request is ignored.
pub trait IntoIndex {
    /// Coerce to an integer, or `None` if the value is not numeric
    fn into_index(self) -> Option<i64>;
}

macro_rules! impl_into_index_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoIndex for $ty {
                fn into_index(self) -> Option<i64> {
                    i64::try_from(self).ok()
                }
            }
        )*
    };
}

impl_into_index_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoIndex for f64 {
    fn into_index(self) -> Option<i64> {
        if !self.is_finite() {
            return None;
        }
        let truncated = self.trunc();
        if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
            return None;
        }
        Some(truncated as i64)
    }
}

impl IntoIndex for f32 {
    fn into_index(self) -> Option<i64> {
        f64::from(self).into_index()
    }
}

impl IntoIndex for &str {
    fn into_index(self) -> Option<i64> {
        parse_int(self)
    }
}

impl IntoIndex for &String {
    fn into_index(self) -> Option<i64> {
        parse_int(self)
    }
}

impl IntoIndex for String {
    fn into_index(self) -> Option<i64> {
        parse_int(&self)
    }
}

impl<T: IntoIndex> IntoIndex for Option<T> {
    fn into_index(self) -> Option<i64> {
        self.and_then(IntoIndex::into_index)
    }
}

/// Parse the leading decimal integer of a string
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit, so `"12px"` is 12. A string with no leading digits, or
/// one whose digits overflow `i64`, is not a number.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        let digit = i64::from(b - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}
