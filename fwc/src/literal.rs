/// Integer literal with optional sign and `0x` / `0o` / `0b` prefix.
///
/// The digits are kept as text so the value can be reduced to any width exactly,
/// however long the literal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    negative: bool,
    radix: u32,
    digits: &'a str,
}

impl<'a> Literal<'a> {
    pub fn parse(s: &'a str) -> Option<Literal<'a>> {
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let prefix = body.get(..2).map(|p| p.to_ascii_lowercase());
        let (radix, digits) = match prefix.as_deref() {
            Some("0x") => (16, &body[2..]),
            Some("0o") => (8, &body[2..]),
            Some("0b") => (2, &body[2..]),
            _ => (10, body),
        };

        // 0x_ff is fine, 0x__ff is not
        let digits = match radix {
            10 => digits,
            _ => digits.strip_prefix('_').unwrap_or(digits),
        };

        if digits.is_empty()
            || digits.starts_with('_')
            || digits.ends_with('_')
            || digits.contains("__")
            || !digits.chars().all(|c| c == '_' || c.is_digit(radix))
        {
            return None;
        }

        // Decimal literals cannot have leading zeros, except zero itself
        if radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0' && c != '_') {
            return None;
        }

        Some(Literal {
            negative,
            radix,
            digits,
        })
    }

    fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.digits.chars().filter_map(|c| c.to_digit(self.radix))
    }

    /// Value modulo 2^16, negative values wrap.
    pub fn wrapping_u16(&self) -> u16 {
        let radix = self.radix as u16;
        let value = self
            .values()
            .fold(0u16, |acc, d| acc.wrapping_mul(radix).wrapping_add(d as u16));
        if self.negative {
            value.wrapping_neg()
        } else {
            value
        }
    }

    /// Exact value, if it is representable as u32.
    pub fn to_u32(&self) -> Option<u32> {
        let value = self
            .values()
            .try_fold(0u32, |acc, d| acc.checked_mul(self.radix)?.checked_add(d))?;
        match (self.negative, value) {
            (true, 0) | (false, _) => Some(value),
            (true, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_of(s: &str) -> Option<u16> {
        Literal::parse(s).map(|lit| lit.wrapping_u16())
    }

    fn u32_of(s: &str) -> Option<u32> {
        Literal::parse(s).and_then(|lit| lit.to_u32())
    }

    #[test]
    fn test_radix() {
        assert_eq!(u16_of("42"), Some(42));
        assert_eq!(u16_of("0x1F"), Some(0x1F));
        assert_eq!(u16_of("0X1f"), Some(0x1F));
        assert_eq!(u16_of("0o17"), Some(0o17));
        assert_eq!(u16_of("0O17"), Some(0o17));
        assert_eq!(u16_of("0b101"), Some(0b101));
        assert_eq!(u16_of("0B101"), Some(0b101));
        assert_eq!(u16_of("0"), Some(0));
        assert_eq!(u16_of("000"), Some(0));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(u16_of("65536"), Some(0));
        assert_eq!(u16_of("65537"), Some(1));
        assert_eq!(u16_of("0x12345"), Some(0x2345));
        assert_eq!(u16_of("-1"), Some(0xFFFF));
        assert_eq!(u16_of("-65536"), Some(0));
        assert_eq!(u16_of("-0x10"), Some(0xFFF0));
        assert_eq!(u16_of("+7"), Some(7));
        // 2^100 + 3
        assert_eq!(u16_of("1267650600228229401496703205379"), Some(3));
        assert_eq!(u16_of("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFF0005"), Some(5));
    }

    #[test]
    fn test_underscores() {
        assert_eq!(u16_of("1_000"), Some(1000));
        assert_eq!(u16_of("0x_ff"), Some(0xFF));
        assert_eq!(u16_of("0_0"), Some(0));
        assert_eq!(u16_of("_1"), None);
        assert_eq!(u16_of("1_"), None);
        assert_eq!(u16_of("1__0"), None);
        assert_eq!(u16_of("0x__ff"), None);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(u16_of(""), None);
        assert_eq!(u16_of("-"), None);
        assert_eq!(u16_of("0x"), None);
        assert_eq!(u16_of("0b2"), None);
        assert_eq!(u16_of("0o8"), None);
        assert_eq!(u16_of("010"), None);
        assert_eq!(u16_of("12a"), None);
        assert_eq!(u16_of("PORT0"), None);
        assert_eq!(u16_of("--1"), None);
        assert_eq!(u16_of("#define"), None);
    }

    #[test]
    fn test_u32_range() {
        assert_eq!(u32_of("0xFFFFFFFF"), Some(u32::MAX));
        assert_eq!(u32_of("4294967296"), None);
        assert_eq!(u32_of("-1"), None);
        assert_eq!(u32_of("-0"), Some(0));
        assert_eq!(u32_of("0x10"), Some(16));
    }
}
