/// Numeric salary bounds decomposed from a free-form range such as
/// `"500000-1200000"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryBounds {
    pub min: i64,
    pub max: i64,
}

impl SalaryBounds {
    /// Parse a salary range.
    ///
    /// Each side of the dash keeps only its digits, so separators and
    /// currency symbols are ignored. A single number yields equal bounds and
    /// reversed bounds are swapped. Returns `None` when either side has no
    /// digits or there is more than one dash.
    pub fn parse(range: &str) -> Option<Self> {
        let (low, high) = match range.split_once('-') {
            Some((_, high)) if high.contains('-') => return None,
            Some((low, high)) => (digits(low)?, digits(high)?),
            None => {
                let value = digits(range)?;
                (value, value)
            }
        };

        Some(Self {
            min: low.min(high),
            max: low.max(high),
        })
    }

    /// Whether these bounds overlap the requested `[min, max]` window.
    /// A missing side of the window is unbounded.
    pub fn overlaps(&self, min: Option<i64>, max: Option<i64>) -> bool {
        min.map_or(true, |min| self.max >= min) && max.map_or(true, |max| self.min <= max)
    }
}

fn digits(part: &str) -> Option<i64> {
    let digits: String = part.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
